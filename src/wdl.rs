//! Game results seen from one mark, and win/draw/loss counts over many games.
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Sub};

use cast_trait::Cast;
use num_traits::{One, Zero};

use crate::board::{Mark, Outcome};

/// A finished game from the POV of one mark, see [POV::pov].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OutcomeWDL {
    Win,
    Draw,
    Loss,
}

/// Counts (or fractions) of won, drawn and lost games.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WDL<V> {
    pub win: V,
    pub draw: V,
    pub loss: V,
}

/// Conversion from an absolute result to one relative to a mark.
pub trait POV {
    type Output;

    fn pov(self, pov: Mark) -> Self::Output;
}

impl POV for Outcome {
    type Output = OutcomeWDL;

    fn pov(self, pov: Mark) -> OutcomeWDL {
        match self {
            Outcome::WonBy(winner) if winner == pov => OutcomeWDL::Win,
            Outcome::WonBy(_) => OutcomeWDL::Loss,
            Outcome::Draw => OutcomeWDL::Draw,
        }
    }
}

impl OutcomeWDL {
    /// A single game as a [WDL] count.
    pub fn to_wdl<V: One + Zero>(self) -> WDL<V> {
        let (win, draw, loss) = match self {
            OutcomeWDL::Win => (V::one(), V::zero(), V::zero()),
            OutcomeWDL::Draw => (V::zero(), V::one(), V::zero()),
            OutcomeWDL::Loss => (V::zero(), V::zero(), V::one()),
        };
        WDL::new(win, draw, loss)
    }

    /// Inverse of [POV::pov] for [Outcome].
    pub fn un_pov(self, pov: Mark) -> Outcome {
        match self {
            OutcomeWDL::Win => Outcome::WonBy(pov),
            OutcomeWDL::Draw => Outcome::Draw,
            OutcomeWDL::Loss => Outcome::WonBy(pov.other()),
        }
    }
}

impl<V> WDL<V> {
    pub fn new(win: V, draw: V, loss: V) -> Self {
        WDL { win, draw, loss }
    }
}

impl<V: Copy> WDL<V> {
    pub fn cast<W>(self) -> WDL<W>
    where
        V: Cast<W>,
    {
        WDL::new(self.win.cast(), self.draw.cast(), self.loss.cast())
    }
}

impl<V: Sub<Output = V>> WDL<V> {
    /// Wins minus losses.
    pub fn value(self) -> V {
        self.win - self.loss
    }
}

impl<V: Add<Output = V>> WDL<V> {
    /// The number of games.
    pub fn sum(self) -> V {
        self.win + self.draw + self.loss
    }
}

impl<V: Add<Output = V>> Add for WDL<V> {
    type Output = WDL<V>;

    fn add(self, rhs: WDL<V>) -> WDL<V> {
        WDL::new(self.win + rhs.win, self.draw + rhs.draw, self.loss + rhs.loss)
    }
}

impl<V: Copy + Add<Output = V>> AddAssign for WDL<V> {
    fn add_assign(&mut self, rhs: WDL<V>) {
        *self = *self + rhs;
    }
}

impl<V: Copy + Div<Output = V>> Div<V> for WDL<V> {
    type Output = WDL<V>;

    fn div(self, rhs: V) -> WDL<V> {
        WDL::new(self.win / rhs, self.draw / rhs, self.loss / rhs)
    }
}

impl<V: Default + Add<Output = V>> Sum for WDL<V> {
    fn sum<I: Iterator<Item = WDL<V>>>(iter: I) -> WDL<V> {
        iter.fold(WDL::default(), Add::add)
    }
}
