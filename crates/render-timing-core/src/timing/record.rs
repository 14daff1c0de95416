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

//! Per-shader timing records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A programmable pipeline stage a shader program slot can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderStage {
    /// Vertex shader stage.
    Vertex,
    /// Geometry shader stage.
    Geometry,
    /// Hull (tessellation control) shader stage.
    Hull,
    /// Domain (tessellation evaluation) shader stage.
    Domain,
    /// Fragment (pixel) shader stage.
    Fragment,
}

impl ShaderStage {
    /// All stages, in the order they appear in records and summaries.
    pub const ALL: [ShaderStage; 5] = [
        ShaderStage::Vertex,
        ShaderStage::Geometry,
        ShaderStage::Hull,
        ShaderStage::Domain,
        ShaderStage::Fragment,
    ];

    /// The label used for this stage in textual summaries.
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "Vertex",
            ShaderStage::Geometry => "Geometry",
            ShaderStage::Hull => "Hull",
            ShaderStage::Domain => "Domain",
            ShaderStage::Fragment => "Fragment",
        }
    }
}

/// The measured cost of one shader program slot within the prior frame.
///
/// An empty name means the stage was not used. Records carry no identity
/// across frames: the whole set is rebuilt every collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShaderTimingRecord {
    /// Name of the vertex shader, or empty.
    pub vertex_name: String,
    /// Name of the geometry shader, or empty.
    pub geometry_name: String,
    /// Name of the hull shader, or empty.
    pub hull_name: String,
    /// Name of the domain shader, or empty.
    pub domain_name: String,
    /// Name of the fragment shader, or empty.
    pub fragment_name: String,
    /// GPU time spent in this program during the frame, in milliseconds. Never negative.
    pub time_ms: f64,
}

impl ShaderTimingRecord {
    /// Returns the shader name bound to `stage` (empty if the stage is unused).
    pub fn name(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex_name,
            ShaderStage::Geometry => &self.geometry_name,
            ShaderStage::Hull => &self.hull_name,
            ShaderStage::Domain => &self.domain_name,
            ShaderStage::Fragment => &self.fragment_name,
        }
    }

    /// Sets the shader name bound to `stage`, returning the updated record.
    pub fn with_stage(mut self, stage: ShaderStage, name: impl Into<String>) -> Self {
        let slot = match stage {
            ShaderStage::Vertex => &mut self.vertex_name,
            ShaderStage::Geometry => &mut self.geometry_name,
            ShaderStage::Hull => &mut self.hull_name,
            ShaderStage::Domain => &mut self.domain_name,
            ShaderStage::Fragment => &mut self.fragment_name,
        };
        *slot = name.into();
        self
    }

    /// Sets the measured time, returning the updated record.
    ///
    /// Negative and NaN inputs are stored as `0.0`.
    pub fn with_time_ms(mut self, time_ms: f64) -> Self {
        self.time_ms = time_ms.max(0.0);
        self
    }

    /// Iterates over the stages that have a shader bound, in stage order.
    pub fn used_stages(&self) -> impl Iterator<Item = (ShaderStage, &str)> + '_ {
        ShaderStage::ALL
            .into_iter()
            .map(move |stage| (stage, self.name(stage)))
            .filter(|(_, name)| !name.is_empty())
    }
}

impl fmt::Display for ShaderTimingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Shader(")?;
        for (i, (stage, name)) in self.used_stages().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", stage.label(), name)?;
        }
        write!(f, ") took {}ms this frame", self.time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_with_only_fragment_stage() {
        let record = ShaderTimingRecord::default()
            .with_stage(ShaderStage::Fragment, "Frag1")
            .with_time_ms(2.5);

        assert_eq!(
            record.to_string(),
            "Shader(Fragment=Frag1) took 2.5ms this frame"
        );
    }

    #[test]
    fn summary_keeps_stage_order() {
        let record = ShaderTimingRecord {
            vertex_name: "V".to_string(),
            fragment_name: "F".to_string(),
            time_ms: 1.0,
            ..Default::default()
        };

        assert_eq!(
            record.to_string(),
            "Shader(Vertex=V, Fragment=F) took 1ms this frame"
        );
    }

    #[test]
    fn summary_with_every_stage() {
        let record = ShaderTimingRecord::default()
            .with_stage(ShaderStage::Domain, "D")
            .with_stage(ShaderStage::Vertex, "V")
            .with_stage(ShaderStage::Hull, "H")
            .with_stage(ShaderStage::Fragment, "F")
            .with_stage(ShaderStage::Geometry, "G")
            .with_time_ms(0.125);

        assert_eq!(
            record.to_string(),
            "Shader(Vertex=V, Geometry=G, Hull=H, Domain=D, Fragment=F) took 0.125ms this frame"
        );
    }

    #[test]
    fn summary_with_no_stage() {
        let record = ShaderTimingRecord::default();
        assert_eq!(record.to_string(), "Shader() took 0ms this frame");
    }

    #[test]
    fn negative_time_is_clamped() {
        let record = ShaderTimingRecord::default().with_time_ms(-3.0);
        assert_eq!(record.time_ms, 0.0);

        let record = ShaderTimingRecord::default().with_time_ms(f64::NAN);
        assert_eq!(record.time_ms, 0.0);
    }

    #[test]
    fn used_stages_skips_empty_names() {
        let record = ShaderTimingRecord::default()
            .with_stage(ShaderStage::Hull, "H")
            .with_stage(ShaderStage::Vertex, "V");

        let stages: Vec<_> = record.used_stages().collect();
        assert_eq!(
            stages,
            vec![(ShaderStage::Vertex, "V"), (ShaderStage::Hull, "H")]
        );
    }
}
