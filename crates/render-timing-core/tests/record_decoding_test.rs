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

use render_timing_core::native::{decode_records, encode_records, NativeShaderTime, RECORD_STRIDE};
use render_timing_core::{ShaderStage, TimingError};
use std::ffi::c_char;

fn record(seed: usize, time_ms: f64) -> NativeShaderTime {
    let name = |slot: usize| {
        // Leave some stages unused to exercise null pointers.
        if (seed + slot) % 3 == 0 {
            0
        } else {
            (seed * 8 + slot + 1) * 0x10
        }
    };
    NativeShaderTime {
        vertex_name: name(0) as *const c_char,
        geometry_name: name(1) as *const c_char,
        hull_name: name(2) as *const c_char,
        domain_name: name(3) as *const c_char,
        fragment_name: name(4) as *const c_char,
        time_ms,
    }
}

fn resolve(address: usize) -> String {
    format!("S{:x}", address)
}

#[test]
fn kth_decoded_record_matches_kth_native_record() {
    for n in [0usize, 1, 2, 7, 64] {
        let raw: Vec<_> = (0..n).map(|k| record(k, k as f64 * 0.25)).collect();
        let bytes = encode_records(&raw);

        let decoded = decode_records(&bytes, n as i64, resolve).unwrap();

        assert_eq!(decoded.len(), n);
        for (k, (native, record)) in raw.iter().zip(&decoded).enumerate() {
            let addresses = [
                native.vertex_name,
                native.geometry_name,
                native.hull_name,
                native.domain_name,
                native.fragment_name,
            ];
            for (stage, address) in ShaderStage::ALL.into_iter().zip(addresses) {
                let expected = if address.is_null() {
                    String::new()
                } else {
                    resolve(address as usize)
                };
                assert_eq!(record.name(stage), expected, "record {k}, {stage:?}");
            }
            assert_eq!(record.time_ms, native.time_ms, "record {k}");
        }
    }
}

#[test]
fn trailing_memory_is_ignored() {
    let raw: Vec<_> = (0..5).map(|k| record(k, 1.0)).collect();
    let mut bytes = encode_records(&raw);
    bytes.extend_from_slice(&[0xAB; 13]);

    let decoded = decode_records(&bytes, 3, resolve).unwrap();

    assert_eq!(decoded.len(), 3);
}

#[test]
fn short_buffers_are_rejected_not_overread() {
    let bytes = encode_records(&[record(0, 1.0), record(1, 2.0)]);

    let err = decode_records(&bytes[..bytes.len() - 1], 2, resolve).unwrap_err();

    assert!(matches!(err, TimingError::Truncated { count: 2, .. }));
    assert_eq!(bytes.len(), 2 * RECORD_STRIDE);
}
