pub use self::{action::*, cell::*, position::*};

pub(crate) mod action;
pub(crate) mod cell;
pub(crate) mod position;
