//! Software conversion engine for raw RGB24 input.

use camgrab_common::error::{CamgrabError, CamgrabResult};
use camgrab_platform_core::{CodecId, FrameTransform, NativeFormat, PixelEncoding, RawFrame};

/// One bound conversion from raw RGB24 to a caller-facing encoding.
pub struct SimTransform {
    width: u32,
    height: u32,
    output: PixelEncoding,
    output_len: usize,
}

impl SimTransform {
    pub fn new(input: &NativeFormat, output: PixelEncoding) -> CamgrabResult<Self> {
        if input.codec != CodecId::RGB24 {
            return Err(CamgrabError::platform(format!(
                "software conversion supports raw RGB24 input only, not {}",
                input.codec
            )));
        }
        let output_len = output
            .frame_bytes(input.width, input.height)
            .ok_or_else(|| CamgrabError::platform("no output layout for the unknown encoding"))?;
        if output == PixelEncoding::I420 && (input.width % 2 != 0 || input.height % 2 != 0) {
            return Err(CamgrabError::platform(
                "4:2:0 output requires even frame dimensions",
            ));
        }

        Ok(Self {
            width: input.width,
            height: input.height,
            output,
            output_len,
        })
    }
}

impl FrameTransform for SimTransform {
    fn output_len(&self) -> usize {
        self.output_len
    }

    fn run(&mut self, input: &RawFrame, output: &mut [u8]) -> CamgrabResult<()> {
        let expected = 3 * self.width as usize * self.height as usize;
        if input.bytes.len() != expected {
            return Err(CamgrabError::platform(format!(
                "frame payload is {} bytes, expected {expected}",
                input.bytes.len()
            )));
        }

        match self.output {
            PixelEncoding::Rgb24 => output.copy_from_slice(&input.bytes),
            PixelEncoding::Rgba32 => rgb_to_rgba(&input.bytes, output),
            PixelEncoding::I420 => {
                rgb_to_i420(
                    &input.bytes,
                    self.width as usize,
                    self.height as usize,
                    output,
                );
            }
            PixelEncoding::Unknown => unreachable!("constructor rejects the unknown encoding"),
        }
        Ok(())
    }
}

fn rgb_to_rgba(input: &[u8], output: &mut [u8]) {
    for (src, dst) in input.chunks_exact(3).zip(output.chunks_exact_mut(4)) {
        dst[..3].copy_from_slice(src);
        dst[3] = 0xff;
    }
}

/// BT.601 studio-swing RGB to planar 4:2:0 with 2x2 chroma averaging.
fn rgb_to_i420(input: &[u8], width: usize, height: usize, output: &mut [u8]) {
    let pixels = width * height;
    let (luma, chroma) = output.split_at_mut(pixels);
    let (u_plane, v_plane) = chroma.split_at_mut(pixels / 4);

    for y in 0..height {
        for x in 0..width {
            let i = 3 * (y * width + x);
            let (r, g, b) = (
                i32::from(input[i]),
                i32::from(input[i + 1]),
                i32::from(input[i + 2]),
            );
            luma[y * width + x] = (((66 * r + 129 * g + 25 * b + 128) >> 8) + 16) as u8;
        }
    }

    let half_width = width / 2;
    for by in 0..height / 2 {
        for bx in 0..half_width {
            let (mut r, mut g, mut b) = (0i32, 0i32, 0i32);
            for dy in 0..2 {
                for dx in 0..2 {
                    let i = 3 * ((2 * by + dy) * width + 2 * bx + dx);
                    r += i32::from(input[i]);
                    g += i32::from(input[i + 1]);
                    b += i32::from(input[i + 2]);
                }
            }
            let (r, g, b) = (r / 4, g / 4, b / 4);

            u_plane[by * half_width + bx] = ((((-38 * r - 74 * g + 112 * b) + 128) >> 8) + 128) as u8;
            v_plane[by * half_width + bx] = ((((112 * r - 94 * g - 18 * b) + 128) >> 8) + 128) as u8;
        }
    }
}
