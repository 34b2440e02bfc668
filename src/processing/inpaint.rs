//! Telea fast-marching inpainting.
//!
//! Holes are filled in order of their distance to the known region. Each new
//! pixel is a weighted average of the known pixels within `radius`, where the
//! weights favour close pixels, pixels on the same distance level and pixels
//! lying along the marching direction. A first-order image-gradient term is
//! added on top of the average.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use image::{Rgb, RgbImage};

use crate::error::PipelineWarning;
use crate::models::{Mask, RasterImage};

/// Neighbourhood radius used by [`reconstruct_from_edge_map`].
pub const DEFAULT_INPAINT_RADIUS: u32 = 3;

/// Larger radii are clamped to this.
pub const MAX_INPAINT_RADIUS: u32 = 100;

const UNREACHED: f32 = 1.0e6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Known,
    Band,
    Inside,
}

/// Heap entry ordered so that `BinaryHeap` pops the smallest arrival time
/// first, oldest entry first on ties.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    time: f32,
    seq: u64,
    x: usize,
    y: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct Marcher {
    width: usize,
    height: usize,
    radius: i64,
    state: Vec<State>,
    time: Vec<f32>,
    pixels: Vec<[f32; 3]>,
    heap: BinaryHeap<Frontier>,
    seq: u64,
}

impl Marcher {
    fn new(image: &RasterImage, holes: &Mask, radius: u32) -> Self {
        let (width, height) = image.dimensions();
        let (width, height) = (width as usize, height as usize);
        let mut state = Vec::with_capacity(width * height);
        let mut time = Vec::with_capacity(width * height);
        let mut pixels = Vec::with_capacity(width * height);

        for y in 0..height as u32 {
            for x in 0..width as u32 {
                let [b, g, r] = image.pixel(x, y);
                if holes.is_selected(x, y) {
                    state.push(State::Inside);
                    time.push(UNREACHED);
                    pixels.push([0.0; 3]);
                } else {
                    state.push(State::Known);
                    time.push(0.0);
                    pixels.push([f32::from(b), f32::from(g), f32::from(r)]);
                }
            }
        }

        let mut marcher = Self {
            width,
            height,
            radius: i64::from(radius.clamp(1, MAX_INPAINT_RADIUS)),
            state,
            time,
            pixels,
            heap: BinaryHeap::new(),
            seq: 0,
        };
        marcher.seed_band();
        marcher
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn at(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            None
        } else {
            Some(self.idx(x as usize, y as usize))
        }
    }

    fn is_settled(&self, x: i64, y: i64) -> bool {
        self.at(x, y)
            .is_some_and(|i| self.state[i] != State::Inside)
    }

    fn push(&mut self, x: usize, y: usize, time: f32) {
        self.heap.push(Frontier {
            time,
            seq: self.seq,
            x,
            y,
        });
        self.seq += 1;
    }

    /// Known pixels touching a hole form the initial band.
    fn seed_band(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let i = self.idx(x, y);
                if self.state[i] != State::Known {
                    continue;
                }
                let touches_hole = neighbours(x as i64, y as i64)
                    .into_iter()
                    .filter_map(|(nx, ny)| self.at(nx, ny))
                    .any(|n| self.state[n] == State::Inside);
                if touches_hole {
                    self.state[i] = State::Band;
                    self.push(x, y, 0.0);
                }
            }
        }
    }

    /// Eikonal update from two orthogonal neighbours.
    fn solve(&self, a: (i64, i64), b: (i64, i64)) -> f32 {
        let ta = self.at(a.0, a.1).map_or(UNREACHED, |i| self.time[i]);
        let tb = self.at(b.0, b.1).map_or(UNREACHED, |i| self.time[i]);
        let a_settled = self.is_settled(a.0, a.1);
        let b_settled = self.is_settled(b.0, b.1);

        match (a_settled, b_settled) {
            (true, true) => {
                let d = ta - tb;
                if d.abs() >= 1.0 {
                    1.0 + ta.min(tb)
                } else {
                    (ta + tb + (2.0 - d * d).sqrt()) * 0.5
                }
            }
            (true, false) => 1.0 + ta,
            (false, true) => 1.0 + tb,
            (false, false) => 1.0 + ta.min(tb),
        }
    }

    fn arrival_time(&self, x: i64, y: i64) -> f32 {
        self.solve((x - 1, y), (x, y - 1))
            .min(self.solve((x + 1, y), (x, y - 1)))
            .min(self.solve((x - 1, y), (x, y + 1)))
            .min(self.solve((x + 1, y), (x, y + 1)))
    }

    /// One-sided or central difference of `sample` over settled neighbours.
    fn gradient(&self, x: i64, y: i64, sample: impl Fn(usize) -> f32) -> (f32, f32) {
        let axis = |prev: (i64, i64), next: (i64, i64)| -> f32 {
            let centre = self.idx(x as usize, y as usize);
            match (self.at(prev.0, prev.1), self.at(next.0, next.1)) {
                (Some(p), Some(n)) if self.state[p] != State::Inside && self.state[n] != State::Inside => {
                    (sample(n) - sample(p)) * 0.5
                }
                (_, Some(n)) if self.state[n] != State::Inside => sample(n) - sample(centre),
                (Some(p), _) if self.state[p] != State::Inside => sample(centre) - sample(p),
                _ => 0.0,
            }
        };
        (
            axis((x - 1, y), (x + 1, y)),
            axis((x, y - 1), (x, y + 1)),
        )
    }

    fn fill(&mut self, x: i64, y: i64) {
        let centre = self.idx(x as usize, y as usize);
        let t_centre = self.time[centre];
        let grad_t = self.gradient(x, y, |i| self.time[i]);
        let r2_max = self.radius * self.radius;

        let mut weighted = [0.0f32; 3];
        let mut jx = [0.0f32; 3];
        let mut jy = [0.0f32; 3];
        let mut total = 0.0f32;

        for ky in (y - self.radius)..=(y + self.radius) {
            for kx in (x - self.radius)..=(x + self.radius) {
                let Some(k) = self.at(kx, ky) else { continue };
                if self.state[k] == State::Inside {
                    continue;
                }
                let (dx, dy) = (x - kx, y - ky);
                let len2 = dx * dx + dy * dy;
                if len2 == 0 || len2 > r2_max {
                    continue;
                }

                let (rx, ry) = (dx as f32, dy as f32);
                let len2 = len2 as f32;
                let dst = 1.0 / (len2 * len2.sqrt());
                let lev = 1.0 / (1.0 + (self.time[k] - t_centre).abs());
                let mut dir = rx * grad_t.0 + ry * grad_t.1;
                if dir.abs() <= 0.01 {
                    dir = 1.0e-6;
                }
                let w = (dst * lev * dir).abs();

                for c in 0..3 {
                    let grad_i = self.gradient(kx, ky, |i| self.pixels[i][c]);
                    weighted[c] += w * self.pixels[k][c];
                    jx[c] -= w * grad_i.0 * rx;
                    jy[c] -= w * grad_i.1 * ry;
                }
                total += w;
            }
        }

        if total <= 0.0 {
            return;
        }
        for c in 0..3 {
            let norm = (jx[c] * jx[c] + jy[c] * jy[c]).sqrt() + 1.0e-20;
            let value = weighted[c] / total + (jx[c] + jy[c]) / norm + 0.5;
            self.pixels[centre][c] = value.clamp(0.0, 255.0).floor();
        }
    }

    fn run(mut self) -> RgbImage {
        while let Some(Frontier { x, y, .. }) = self.heap.pop() {
            let i = self.idx(x, y);
            self.state[i] = State::Known;

            for (nx, ny) in neighbours(x as i64, y as i64) {
                let Some(n) = self.at(nx, ny) else { continue };
                if self.state[n] != State::Inside {
                    continue;
                }
                let t = self.arrival_time(nx, ny);
                self.time[n] = t;
                self.fill(nx, ny);
                self.state[n] = State::Band;
                self.push(nx as usize, ny as usize, t);
            }
        }

        let width = self.width as u32;
        RgbImage::from_fn(width, self.height as u32, |x, y| {
            let p = self.pixels[self.idx(x as usize, y as usize)];
            Rgb([p[0] as u8, p[1] as u8, p[2] as u8])
        })
    }
}

fn neighbours(x: i64, y: i64) -> [(i64, i64); 4] {
    [(x, y - 1), (x - 1, y), (x, y + 1), (x + 1, y)]
}

/// Fill the pixels selected by `holes` from the unselected ones.
///
/// Unselected pixels are copied unchanged. Holes with no known pixel
/// anywhere in the image stay black. `radius` is clamped to
/// `1..=MAX_INPAINT_RADIUS`.
///
/// # Panics
///
/// If `holes` and `image` have different dimensions.
pub fn inpaint(image: &RasterImage, holes: &Mask, radius: u32) -> RasterImage {
    assert_eq!(
        image.dimensions(),
        holes.dimensions(),
        "mask dimensions must match the image"
    );
    RasterImage::from_buffer(Marcher::new(image, holes, radius).run())
}

/// Holes are the pixels where every channel of the edge map is zero.
pub fn edge_map_mask(edge_map: &RasterImage) -> Mask {
    Mask::from_fn(edge_map.width(), edge_map.height(), |x, y| {
        edge_map.pixel(x, y) == [0, 0, 0]
    })
}

/// Output of a reconstruction, with any condition the caller should not
/// silently trust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub image: RasterImage,
    pub warning: Option<PipelineWarning>,
}

impl Reconstruction {
    pub fn is_degenerate(&self) -> bool {
        self.warning == Some(PipelineWarning::DegenerateInput)
    }
}

/// Treat non-black pixels of `edge_map` as known and inpaint the rest.
pub fn reconstruct_from_edge_map(edge_map: &RasterImage) -> Reconstruction {
    reconstruct_with_radius(edge_map, DEFAULT_INPAINT_RADIUS)
}

pub fn reconstruct_with_radius(edge_map: &RasterImage, radius: u32) -> Reconstruction {
    let holes = edge_map_mask(edge_map);
    let hole_count = holes.count_selected();
    let total = edge_map.width() as usize * edge_map.height() as usize;

    let warning = if hole_count == total {
        log::warn!("{}", PipelineWarning::DegenerateInput);
        Some(PipelineWarning::DegenerateInput)
    } else {
        None
    };
    log::debug!(
        "reconstruction: {} of {} pixels to fill, radius {}",
        hole_count,
        total,
        radius
    );

    Reconstruction {
        image: inpaint(edge_map, &holes, radius),
        warning,
    }
}
