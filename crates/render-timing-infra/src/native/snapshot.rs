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

//! Copying the plugin's record array out of plugin-owned memory.

use render_timing_core::native::{encode_records, NativeShaderTime, NativeTimingArray};
use std::collections::HashMap;
use std::ffi::{c_char, CStr};

/// Copies `records` and every shader name they reference into an owned array.
///
/// # Safety
///
/// Every non-null name pointer in `records` must point to a NUL-terminated
/// string that stays valid for the duration of the call.
#[cfg_attr(not(feature = "native-plugin"), allow(dead_code))]
pub(crate) unsafe fn snapshot_records(records: &[NativeShaderTime]) -> NativeTimingArray {
    let mut names = HashMap::new();
    for address in records.iter().flat_map(NativeShaderTime::name_addresses) {
        if address == 0 || names.contains_key(&address) {
            continue;
        }
        // SAFETY: non-null and NUL-terminated per the caller's contract.
        let name = unsafe { CStr::from_ptr(address as *const c_char) };
        names.insert(address, name.to_string_lossy().into_owned());
    }
    NativeTimingArray::new(encode_records(records), records.len() as i64).with_names(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use render_timing_core::{ShaderStage, ShaderTimingRecord};
    use std::ffi::CString;
    use std::ptr;

    #[test]
    fn snapshot_keeps_names_after_the_source_is_gone() {
        let vertex = CString::new("Lit_VS").unwrap();
        let fragment = CString::new("Lit_PS").unwrap();
        let records = [
            NativeShaderTime {
                vertex_name: vertex.as_ptr(),
                geometry_name: ptr::null(),
                hull_name: ptr::null(),
                domain_name: ptr::null(),
                fragment_name: fragment.as_ptr(),
                time_ms: 1.25,
            },
            NativeShaderTime {
                vertex_name: ptr::null(),
                geometry_name: ptr::null(),
                hull_name: ptr::null(),
                domain_name: ptr::null(),
                fragment_name: fragment.as_ptr(),
                time_ms: 0.5,
            },
        ];

        // SAFETY: both names are live CStrings.
        let array = unsafe { snapshot_records(&records) };
        drop(vertex);
        drop(fragment);

        assert_eq!(array.count, 2);
        assert_eq!(array.names.len(), 2, "shared names are read once");
        assert_eq!(
            array.decode().unwrap(),
            vec![
                ShaderTimingRecord::default()
                    .with_stage(ShaderStage::Vertex, "Lit_VS")
                    .with_stage(ShaderStage::Fragment, "Lit_PS")
                    .with_time_ms(1.25),
                ShaderTimingRecord::default()
                    .with_stage(ShaderStage::Fragment, "Lit_PS")
                    .with_time_ms(0.5),
            ]
        );
    }

    #[test]
    fn empty_snapshot() {
        // SAFETY: no records, no names.
        let array = unsafe { snapshot_records(&[]) };
        assert_eq!(array, NativeTimingArray::new(Vec::new(), 0));
    }
}
