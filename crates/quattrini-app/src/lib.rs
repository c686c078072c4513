// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod event;
mod forms;
mod input;
mod model;
mod update;

pub use event::*;
pub use forms::*;
pub use input::*;
pub use model::*;
