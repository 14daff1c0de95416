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

//! Platform identity and graphics API descriptions.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The operating system family the process runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Android devices.
    Android,
    /// iOS devices.
    Ios,
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    MacOs,
    /// Linux desktops.
    Linux,
    /// Anything else.
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

/// The graphics API driving the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GraphicsApi {
    /// No device (batch mode).
    Null,
    /// Direct3D 9.
    Direct3D9,
    /// Direct3D 11.
    Direct3D11,
    /// Direct3D 12.
    Direct3D12,
    /// OpenGL ES 2.0.
    OpenGlEs2,
    /// OpenGL ES 3.x.
    OpenGlEs3,
    /// Desktop OpenGL core profile.
    OpenGlCore,
    /// Apple Metal.
    Metal,
    /// Vulkan.
    Vulkan,
    /// Any renderer not listed above.
    #[default]
    Unknown,
}

impl fmt::Display for GraphicsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphicsApi::Null => "null device (used in batch mode)",
            GraphicsApi::Direct3D9 => "Direct3D 9",
            GraphicsApi::Direct3D11 => "Direct3D 11",
            GraphicsApi::Direct3D12 => "Direct3D 12",
            GraphicsApi::OpenGlEs2 => "OpenGL ES 2.0",
            GraphicsApi::OpenGlEs3 => "OpenGL ES 3.0",
            GraphicsApi::OpenGlCore => "OpenGL core",
            GraphicsApi::Metal => "iOS Metal",
            GraphicsApi::Vulkan => "Vulkan",
            GraphicsApi::Unknown => "Unknown Device Type",
        };
        f.write_str(name)
    }
}

impl FromStr for GraphicsApi {
    type Err = ParseError;

    /// Parses short, case-insensitive identifiers such as `d3d11`, `gles3` or `metal`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "null" => Ok(GraphicsApi::Null),
            "d3d9" => Ok(GraphicsApi::Direct3D9),
            "d3d11" => Ok(GraphicsApi::Direct3D11),
            "d3d12" => Ok(GraphicsApi::Direct3D12),
            "gles2" => Ok(GraphicsApi::OpenGlEs2),
            "gles3" => Ok(GraphicsApi::OpenGlEs3),
            "glcore" => Ok(GraphicsApi::OpenGlCore),
            "metal" => Ok(GraphicsApi::Metal),
            "vulkan" => Ok(GraphicsApi::Vulkan),
            "unknown" => Ok(GraphicsApi::Unknown),
            other => Err(ParseError::UnknownGraphicsApi(other.to_string())),
        }
    }
}

/// How the running binary was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildFlavor {
    /// A build running on the target device.
    Device,
    /// Running inside an editor.
    Editor,
    /// A desktop standalone build used for iteration.
    Standalone,
}

impl FromStr for BuildFlavor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "device" => Ok(BuildFlavor::Device),
            "editor" => Ok(BuildFlavor::Editor),
            "standalone" => Ok(BuildFlavor::Standalone),
            other => Err(ParseError::UnknownBuildFlavor(other.to_string())),
        }
    }
}

/// Everything the capability policy needs to know about the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// The operating system family.
    pub platform: Platform,
    /// The active graphics API.
    pub graphics_api: GraphicsApi,
    /// The OS API level, when the platform exposes one (Android SDK level).
    pub os_api_level: Option<u32>,
    /// The build flavor.
    pub build: BuildFlavor,
}

impl PlatformInfo {
    /// Describes a device build of `platform` using `graphics_api`.
    pub fn device(platform: Platform, graphics_api: GraphicsApi) -> Self {
        Self {
            platform,
            graphics_api,
            os_api_level: None,
            build: BuildFlavor::Device,
        }
    }

    /// Sets the OS API level.
    pub fn with_api_level(mut self, level: u32) -> Self {
        self.os_api_level = Some(level);
        self
    }

    /// Sets the build flavor.
    pub fn with_build(mut self, build: BuildFlavor) -> Self {
        self.build = build;
        self
    }
}

/// A source of [`PlatformInfo`].
///
/// Probing may touch the OS (system properties, driver queries), so the
/// selector calls it at most once.
pub trait PlatformProbe: Send + Sync {
    /// Describes the running process.
    fn probe(&self) -> PlatformInfo;
}

impl PlatformProbe for PlatformInfo {
    fn probe(&self) -> PlatformInfo {
        *self
    }
}
