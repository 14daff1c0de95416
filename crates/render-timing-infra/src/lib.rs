// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Render Timing Infra
//!
//! Concrete implementations of the seams defined in `render-timing-core`:
//!
//! - [`native`]: the `extern "C"` binding to the `RenderTimingPlugin` library
//!   (behind the `native-plugin` feature) and the log callback handed to it.
//! - [`platform`]: probing of the running platform, including the Android SDK
//!   level.
//! - [`stream`]: a command stream that runs plugin events immediately, for
//!   hosts that call it from their render thread.
//!
//! Every `unsafe` block of the workspace lives in this crate.

#![warn(missing_docs)]

pub mod native;
pub mod platform;
pub mod stream;

pub use native::{native_plugin, plugin_log_callback};
pub use platform::SystemProbe;
pub use stream::ImmediateCommandStream;
