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

//! Runtime selection of the timer backend.
//!
//! The decision depends on the platform, the active graphics API, the OS API
//! level (Android only) and the build flavor. It is taken once per
//! [`CapabilitySelector`] and never revisited.

mod platform;
mod policy;
mod selector;

pub use self::platform::{BuildFlavor, GraphicsApi, Platform, PlatformInfo, PlatformProbe};
pub use self::policy::{CapabilityPolicy, TimerBackend};
pub use self::selector::CapabilitySelector;
