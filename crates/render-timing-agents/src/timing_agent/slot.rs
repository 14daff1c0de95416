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

use std::sync::atomic::{AtomicBool, Ordering};

/// A claim token allowing at most one holder at a time.
#[derive(Debug)]
pub struct InstanceSlot {
    claimed: AtomicBool,
}

static PROCESS_SLOT: InstanceSlot = InstanceSlot::new();

impl InstanceSlot {
    /// An unclaimed slot.
    pub const fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
        }
    }

    /// The process-wide slot shared by every agent that was not given its own.
    pub fn process() -> &'static InstanceSlot {
        &PROCESS_SLOT
    }

    /// Claims the slot. Returns `false` if it is already held.
    pub fn claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases the slot.
    pub fn release(&self) {
        self.claimed.store(false, Ordering::Release);
    }

    /// Returns `true` while the slot is held.
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}

impl Default for InstanceSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_claim_at_a_time() {
        let slot = InstanceSlot::new();
        assert!(slot.claim());
        assert!(!slot.claim(), "second claim must fail while held");

        slot.release();
        assert!(!slot.is_claimed());
        assert!(slot.claim(), "slot is reusable after release");
    }
}
