//! Canned narrative used whenever the narrator can't deliver.

use super::Phase;
use crate::dialogue::{CharacterId, DialogueLine, Mood};

/// Lines for a phase when the narrator fails. Never empty.
pub fn dialogue(phase: Phase) -> Vec<DialogueLine> {
    match phase {
        Phase::Start => vec![
            DialogueLine::new(
                CharacterId::Nova,
                "欢迎来到银河数学学院，新兵。我是诺瓦指挥官。",
            ),
            DialogueLine::new(
                CharacterId::Sparky,
                "哔哔！我是斯帕克！你的飞船引擎已经预热完毕！",
            )
            .with_mood(Mood::Happy),
        ],
        Phase::BossApproach => vec![
            DialogueLine::new(
                CharacterId::Chaos,
                "你们这些只会死记硬背的地球人，感受混乱吧！",
            )
            .with_mood(Mood::Angry),
            DialogueLine::new(CharacterId::Nova, "别听他的！集中精神，计算结果！"),
        ],
        Phase::Victory | Phase::GameOver => vec![DialogueLine::new(
            CharacterId::Sparky,
            "通讯受到干扰...我们必须靠自己了！",
        )
        .with_mood(Mood::Worried)],
    }
}

/// Debrief when the report request failed outright.
pub fn failed_report(score: u32) -> String {
    format!("通讯结束。最终得分: {score}。下次再战！")
}

/// Debrief when the narrator answered with nothing.
pub fn blank_report(score: u32) -> String {
    format!("战斗结束！得分: {score}。继续加油！")
}
