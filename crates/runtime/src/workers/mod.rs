//! Background tasks owned by the session.

mod battle;

pub(crate) use battle::{BattleWorker, Command};
