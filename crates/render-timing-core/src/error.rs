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

//! Error types for decoding native timing data and parsing identifiers.

use thiserror::Error;

/// A convenience alias for results produced by the decoding layer.
pub type TimingResult<T> = Result<T, TimingError>;

/// An error raised while interpreting data handed over by the native plugin.
///
/// None of these are fatal: the collector logs them and treats the frame as
/// having no shader records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimingError {
    /// The native buffer holds fewer bytes than `count` records require.
    #[error("native timing buffer truncated: {count} records of {stride} bytes need {needed} bytes, got {available}")]
    Truncated {
        /// Number of records the native layer reported.
        count: usize,
        /// Size in bytes of a single record.
        stride: usize,
        /// Bytes required to hold `count` records.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },
    /// The reported record count does not fit in the address space.
    #[error("native record count {0} overflows the addressable buffer size")]
    CountOverflow(usize),
    /// The native layer reported a negative record count.
    #[error("native layer reported a negative record count: {0}")]
    NegativeCount(i64),
}

/// An identifier that names no known platform setting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not one of the graphics API identifiers.
    #[error("unknown graphics API '{0}'")]
    UnknownGraphicsApi(String),
    /// Not one of the build flavor identifiers.
    #[error("unknown build flavor '{0}'")]
    UnknownBuildFlavor(String),
}
