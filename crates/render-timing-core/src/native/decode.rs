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

//! Decoding of the plugin's fixed-layout shader timing array.
//!
//! The plugin hands out a pointer to `count` contiguous [`NativeShaderTime`]
//! structs. The decoder works on the byte view of that memory, reads exactly
//! `count` strides and produces owned [`ShaderTimingRecord`]s.

use crate::error::{TimingError, TimingResult};
use crate::timing::{ShaderStage, ShaderTimingRecord};
use std::ffi::c_char;
use std::mem::{offset_of, size_of};

/// The plugin's record layout (`ShaderTime` on the C side).
///
/// Name pointers may be null; each points to a NUL-terminated string owned by
/// the plugin.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NativeShaderTime {
    /// Vertex shader name.
    pub vertex_name: *const c_char,
    /// Geometry shader name.
    pub geometry_name: *const c_char,
    /// Hull shader name.
    pub hull_name: *const c_char,
    /// Domain shader name.
    pub domain_name: *const c_char,
    /// Fragment (pixel) shader name.
    pub fragment_name: *const c_char,
    /// Time in milliseconds.
    pub time_ms: f64,
}

/// Size in bytes of one native record, including trailing padding.
pub const RECORD_STRIDE: usize = size_of::<NativeShaderTime>();

const ADDRESS_SIZE: usize = size_of::<usize>();
const TIME_OFFSET: usize = offset_of!(NativeShaderTime, time_ms);

/// Byte offsets of the name pointers, in [`ShaderStage::ALL`] order.
const NAME_OFFSETS: [usize; 5] = [
    offset_of!(NativeShaderTime, vertex_name),
    offset_of!(NativeShaderTime, geometry_name),
    offset_of!(NativeShaderTime, hull_name),
    offset_of!(NativeShaderTime, domain_name),
    offset_of!(NativeShaderTime, fragment_name),
];

impl NativeShaderTime {
    /// The name pointers as plain addresses, in [`ShaderStage::ALL`] order.
    pub fn name_addresses(&self) -> [usize; 5] {
        [
            self.vertex_name as usize,
            self.geometry_name as usize,
            self.hull_name as usize,
            self.domain_name as usize,
            self.fragment_name as usize,
        ]
    }
}

/// Decodes `count` records from `bytes`.
///
/// Null name pointers become empty names; every other address is turned into
/// a string by `resolve_name`. Bytes past `count * RECORD_STRIDE` are never
/// read. Negative times are clamped to zero.
pub fn decode_records<F>(
    bytes: &[u8],
    count: i64,
    mut resolve_name: F,
) -> TimingResult<Vec<ShaderTimingRecord>>
where
    F: FnMut(usize) -> String,
{
    let count = usize::try_from(count).map_err(|_| TimingError::NegativeCount(count))?;
    let needed = count
        .checked_mul(RECORD_STRIDE)
        .ok_or(TimingError::CountOverflow(count))?;
    if bytes.len() < needed {
        return Err(TimingError::Truncated {
            count,
            stride: RECORD_STRIDE,
            needed,
            available: bytes.len(),
        });
    }

    let mut records = Vec::with_capacity(count);
    for chunk in bytes[..needed].chunks_exact(RECORD_STRIDE) {
        let mut record = ShaderTimingRecord::default();
        for (stage, offset) in ShaderStage::ALL.into_iter().zip(NAME_OFFSETS) {
            let address: usize =
                bytemuck::pod_read_unaligned(&chunk[offset..offset + ADDRESS_SIZE]);
            if address != 0 {
                record = record.with_stage(stage, resolve_name(address));
            }
        }
        let time_ms: f64 = bytemuck::pod_read_unaligned(&chunk[TIME_OFFSET..TIME_OFFSET + 8]);
        records.push(record.with_time_ms(time_ms));
    }
    Ok(records)
}

/// Lays `records` out exactly as the plugin does, padding bytes zeroed.
///
/// Used by in-memory stand-ins for the plugin.
pub fn encode_records(records: &[NativeShaderTime]) -> Vec<u8> {
    let mut bytes = vec![0u8; records.len() * RECORD_STRIDE];
    for (record, chunk) in records.iter().zip(bytes.chunks_exact_mut(RECORD_STRIDE)) {
        for (address, offset) in record.name_addresses().into_iter().zip(NAME_OFFSETS) {
            chunk[offset..offset + ADDRESS_SIZE].copy_from_slice(&address.to_ne_bytes());
        }
        chunk[TIME_OFFSET..TIME_OFFSET + 8].copy_from_slice(&record.time_ms.to_ne_bytes());
    }
    bytes
}
