use cubecl::prelude::*;

/// First line whose cumulative segment count exceeds `slot`; `lines_len` if none.
#[cube]
pub(super) fn locate_line(line_lens: &Array<u32>, lines_len: u32, slot: u32) -> u32 {
    let mut lo = u32::new(0);
    let mut hi = lines_len;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if line_lens[mid as usize] > slot {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Position of `slot` within line `line`.
#[cube]
pub(super) fn local_index(line_lens: &Array<u32>, line: u32, slot: u32) -> u32 {
    let mut local = slot;
    if line > u32::new(0) {
        local = slot - line_lens[(line - 1) as usize];
    }
    local
}
