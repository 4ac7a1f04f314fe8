// src/toys.rs
//! Dice roller and magic 8-ball.
//!
//! Both run a short animation after a tap and then settle on a value drawn
//! from the board's [`RandomSource`]. Animation frames are driven by
//! [`tick`](Dice::tick) and never count as user interaction.

use embassy_time::{Duration, Instant};

use crate::hal::RandomSource;

pub const DICE_FACES: u8 = 6;

/// The twenty classic answers.
pub const EIGHT_BALL_ANSWERS: [&str; 20] = [
    "It is certain",
    "Decidedly so",
    "Without a doubt",
    "Yes definitely",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Yes",
    "Signs point to yes",
    "Reply hazy",
    "Ask again later",
    "Better not tell",
    "Cannot predict now",
    "Concentrate",
    "Don't count on it",
    "My reply is no",
    "Sources say no",
    "Outlook not good",
    "Very doubtful",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceSnapshot {
    /// 1..=6
    pub face: u8,
    pub rolling: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EightBallSnapshot {
    /// Index into [`EIGHT_BALL_ANSWERS`], `None` before the first shake
    pub answer: Option<usize>,
    pub shaking: bool,
}

impl EightBallSnapshot {
    pub fn text(&self) -> &'static str {
        match (self.shaking, self.answer) {
            (true, _) => "...",
            (false, Some(i)) => EIGHT_BALL_ANSWERS[i % EIGHT_BALL_ANSWERS.len()],
            (false, None) => "Tap to ask",
        }
    }
}

fn draw(random: &mut impl RandomSource, range: u32) -> u32 {
    random.next_u32() % range
}

#[derive(Debug, Clone)]
pub struct Dice {
    face: u8,
    rolling_until: Option<Instant>,
    animation: Duration,
}

impl Dice {
    pub fn new(animation: Duration) -> Self {
        Self {
            face: 1,
            rolling_until: None,
            animation,
        }
    }

    pub fn roll(&mut self, now: Instant) {
        self.rolling_until = Some(now + self.animation);
    }

    /// Advance the animation. Returns `true` if the face changed.
    pub fn tick(&mut self, now: Instant, random: &mut impl RandomSource) -> bool {
        let Some(deadline) = self.rolling_until else {
            return false;
        };
        if now >= deadline {
            self.rolling_until = None;
        }
        // Tumbling frames and the final face both come from the source.
        self.face = draw(random, DICE_FACES as u32) as u8 + 1;
        true
    }

    pub fn snapshot(&self) -> DiceSnapshot {
        DiceSnapshot {
            face: self.face,
            rolling: self.rolling_until.is_some(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EightBall {
    answer: Option<usize>,
    shaking_until: Option<Instant>,
    animation: Duration,
}

impl EightBall {
    pub fn new(animation: Duration) -> Self {
        Self {
            answer: None,
            shaking_until: None,
            animation,
        }
    }

    pub fn shake(&mut self, now: Instant) {
        self.shaking_until = Some(now + self.animation);
    }

    /// Settle on an answer once the shake is over.
    pub fn tick(&mut self, now: Instant, random: &mut impl RandomSource) -> bool {
        match self.shaking_until {
            Some(deadline) if now >= deadline => {
                self.shaking_until = None;
                self.answer = Some(draw(random, EIGHT_BALL_ANSWERS.len() as u32) as usize);
                true
            }
            _ => false,
        }
    }

    pub fn snapshot(&self) -> EightBallSnapshot {
        EightBallSnapshot {
            answer: self.answer,
            shaking: self.shaking_until.is_some(),
        }
    }
}
