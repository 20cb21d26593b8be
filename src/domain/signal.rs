//! Trade signals derived from indicator columns.
//!
//! A `SignalFrame` wraps an `IndicatorFrame` with up to two per-row signal
//! columns (`signal` for direct rules, `position` for differenced trend
//! state) and declares which one drives the simulator. `None` rows are
//! undefined (warmup, or a difference touching undefined state) and replay
//! as holds.

use crate::domain::error::StratsimError;
use crate::domain::indicator::IndicatorFrame;
use std::fmt;

/// A single day's instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// Numeric form: +1 buy, -1 sell, 0 hold.
    pub fn value(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }
}

/// Which signal column the simulator replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerColumn {
    Signal,
    Position,
}

impl fmt::Display for TriggerColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerColumn::Signal => write!(f, "signal"),
            TriggerColumn::Position => write!(f, "position"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignalFrame {
    frame: IndicatorFrame,
    signal: Option<Vec<Option<Signal>>>,
    position: Option<Vec<Option<Signal>>>,
    trigger: TriggerColumn,
}

impl SignalFrame {
    /// Build with an explicit trigger declaration. The declaration may name
    /// a column that was never attached; the simulator surfaces that as
    /// `MissingSignal` when it asks for the trigger series.
    pub fn new(
        frame: IndicatorFrame,
        signal: Option<Vec<Option<Signal>>>,
        position: Option<Vec<Option<Signal>>>,
        trigger: TriggerColumn,
    ) -> Self {
        Self {
            frame,
            signal,
            position,
            trigger,
        }
    }

    /// A frame driven by its `signal` column.
    pub fn from_signal(frame: IndicatorFrame, signal: Vec<Option<Signal>>) -> Self {
        Self::new(frame, Some(signal), None, TriggerColumn::Signal)
    }

    /// A frame driven by its `position` column.
    pub fn from_position(frame: IndicatorFrame, position: Vec<Option<Signal>>) -> Self {
        Self::new(frame, None, Some(position), TriggerColumn::Position)
    }

    /// Infer the trigger the way older callers did: prefer `position` when
    /// present, else `signal`; neither is an error.
    pub fn from_columns(
        frame: IndicatorFrame,
        signal: Option<Vec<Option<Signal>>>,
        position: Option<Vec<Option<Signal>>>,
    ) -> Result<Self, StratsimError> {
        let trigger = if position.is_some() {
            TriggerColumn::Position
        } else if signal.is_some() {
            TriggerColumn::Signal
        } else {
            return Err(StratsimError::MissingSignal {
                reason: "neither signal nor position column present".into(),
            });
        };
        Ok(Self::new(frame, signal, position, trigger))
    }

    pub fn frame(&self) -> &IndicatorFrame {
        &self.frame
    }

    pub fn trigger(&self) -> TriggerColumn {
        self.trigger
    }

    pub fn signal(&self) -> Option<&[Option<Signal>]> {
        self.signal.as_deref()
    }

    pub fn position(&self) -> Option<&[Option<Signal>]> {
        self.position.as_deref()
    }

    /// Number of rows, same as the underlying series.
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    /// The declared trigger column.
    pub fn trigger_series(&self) -> Result<&[Option<Signal>], StratsimError> {
        let column = match self.trigger {
            TriggerColumn::Signal => self.signal.as_deref(),
            TriggerColumn::Position => self.position.as_deref(),
        };
        column.ok_or_else(|| StratsimError::MissingSignal {
            reason: format!(
                "frame declares trigger '{}' but carries no such column",
                self.trigger
            ),
        })
    }
}
