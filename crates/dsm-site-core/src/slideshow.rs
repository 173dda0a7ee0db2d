//! Slideshow index rules and existence probing.
//!
//! Images live on an external host and may be missing. Before showing an
//! index the caller probes forward (wrapping) for the first image that loads.

use async_trait::async_trait;
use std::cell::Cell;

/// Delay between hiding the old image and showing the new one.
pub const FADE_MS: u32 = 300;

#[async_trait(?Send)]
pub trait ImageProbe {
    async fn exists(&self, url: &str) -> bool;
}

pub struct Slideshow {
    slides: Vec<String>,
    current: Cell<usize>,
}

impl Slideshow {
    pub fn new(slides: Vec<String>) -> Self {
        Self {
            slides,
            current: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current.get()
    }

    pub fn set_current(&self, index: usize) {
        if index < self.len() {
            self.current.set(index);
        }
    }

    pub fn next_index(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.current() + 1) % self.len()
    }

    pub fn prev_index(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.current() + self.len() - 1) % self.len()
    }

    pub fn url(&self, index: usize) -> Option<&str> {
        self.slides.get(index).map(String::as_str)
    }

    /// First index at or after `start` (wrapping) whose image exists. Each
    /// slide is probed at most once; if none loads, `start` is returned.
    /// `None` only for an empty slideshow.
    pub async fn first_available<P>(&self, start: usize, probe: &P) -> Option<usize>
    where
        P: ImageProbe + ?Sized,
    {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let start = start % len;
        for offset in 0..len {
            let index = (start + offset) % len;
            if probe.exists(&self.slides[index]).await {
                return Some(index);
            }
        }
        Some(start)
    }
}
