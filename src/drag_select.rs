//! Rubber-band multi-selection of OCR blocks.
//!
//! A small machine independent of the entity gesture engine. It only sees
//! pointer downs the entity layer declined, and its releases resolve to
//! either a click (clear, or no-op when additive) or an intersection sweep
//! over the page's projected blocks.

use crate::commands::Command;
use crate::constants::DRAG_SELECT_CLICK_MAX_PX;
use crate::geometry::{BBox, Point};
use crate::input::{Dispatch, PointerDownEvent, PointerMoveEvent, PointerUpEvent};
use crate::scene::PageScene;

#[derive(Debug, Clone, Copy)]
struct RubberBand {
    start: Point,
    current: Point,
    /// Captured at the initial press, not at release.
    additive: bool,
}

/// Drag-select overlay state.
#[derive(Debug, Default)]
pub struct DragSelect {
    band: Option<RubberBand>,
}

impl DragSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.band.is_some()
    }

    /// Normalized rubber-band rectangle to render, if a drag is in flight.
    pub fn band_box(&self) -> Option<BBox> {
        self.band
            .map(|band| BBox::from_points(band.start, band.current))
    }

    pub fn on_pointer_down(&mut self, event: &PointerDownEvent) -> Dispatch {
        self.band = Some(RubberBand {
            start: event.position,
            current: event.position,
            additive: event.modifiers.additive(),
        });
        Dispatch::Consumed(Vec::new())
    }

    pub fn on_pointer_move(&mut self, event: &PointerMoveEvent) {
        if let Some(band) = &mut self.band {
            band.current = event.position;
        }
    }

    pub fn on_pointer_up(&mut self, event: &PointerUpEvent, scene: &PageScene) -> Vec<Command> {
        let Some(band) = self.band.take() else {
            return Vec::new();
        };
        let rect = BBox::from_points(band.start, event.position);
        let page_index = scene.page_index();

        // Tiny bands are clicks: clear the page selection unless additive.
        let click_max = scene.tolerance(DRAG_SELECT_CLICK_MAX_PX);
        if rect.width() < click_max && rect.height() < click_max {
            if band.additive {
                return Vec::new();
            }
            return vec![Command::SetSelectedBlocks {
                page_index,
                indices: Vec::new(),
                additive: false,
            }];
        }

        let mut indices = scene.block_index().query_rect(&rect);
        indices.sort_unstable();
        tracing::debug!(hits = indices.len(), "drag selection resolved");

        if indices.is_empty() {
            // Sweeping an empty area clears, unless the gesture was additive.
            if band.additive {
                return Vec::new();
            }
            return vec![Command::SetSelectedBlocks {
                page_index,
                indices: Vec::new(),
                additive: false,
            }];
        }

        vec![Command::SetSelectedBlocks {
            page_index,
            indices,
            additive: band.additive,
        }]
    }

    /// Abandon an in-flight band without emitting anything.
    pub fn cancel(&mut self) {
        self.band = None;
    }
}
