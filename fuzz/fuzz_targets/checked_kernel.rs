#![no_main]

use dyn_iir::{apply_checked, CoefTableRef, Frame, StereoFrame};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&header, rest)) = data.split_first() else {
        return;
    };
    let order = usize::from(header % 8) + 1;
    let mut words = rest
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));

    let blocks = words.next().map_or(0, |w| w as usize % 4);
    let table: Vec<f32> = words.by_ref().take(blocks * order * 2).map(f32::from_bits).collect();
    let frames = words.next().map_or(0, |w| w as usize % 64);
    let indices: Vec<u32> = words.by_ref().take(frames).map(|w| w % 6).collect();
    let input: Vec<StereoFrame> = words
        .by_ref()
        .take(frames)
        .map(|w| Frame::new([f32::from_bits(w), f32::from_bits(w.rotate_left(7))]))
        .collect();

    let Ok(table) = CoefTableRef::new(order, &table) else {
        return;
    };
    let mut output = vec![StereoFrame::splat(1.0); input.len()];
    // Short buffers and stray indices must come back as errors, never as panics.
    let _ = apply_checked(table, &indices, &input, &mut output, frames);
    assert!(output
        .iter()
        .take(order.min(output.len()))
        .all(|frame| *frame == StereoFrame::splat(1.0)));
});
