// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod impls;
pub mod schedule;
pub mod timer;

pub use schedule::FixedRate;
pub use timer::Timer;
