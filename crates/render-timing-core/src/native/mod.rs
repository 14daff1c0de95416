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

//! The boundary toward the native timing plugin.
//!
//! The plugin exposes a small C ABI. [`NativeTimingApi`] is the safe seam over
//! it, [`decode_records`] turns the plugin's record array into owned values,
//! and [`NativeSession`] enforces the registration-first calling protocol.

mod api;
mod decode;
mod session;

pub use self::api::{
    FrameEndToken, LogCallbackFn, NativeTimingApi, NativeTimingArray, RenderingEventFn,
};
pub use self::decode::{decode_records, encode_records, NativeShaderTime, RECORD_STRIDE};
pub use self::session::NativeSession;
