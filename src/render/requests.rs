// src/render/requests.rs
//! Pure construction of the Slides API `batchUpdate` request list.
//!
//! Object ids are derived from slide position, so the same deck always
//! yields the same batch.

use crate::constants::{
    BODY_FONT_SIZE_PT, BODY_TEXT_COLOR, BULLET_DELIMITER, BULLET_MARKER, BULLET_PRESET,
    TITLE_FONT_SIZE_PT, TITLE_PALETTE,
};
use crate::model::{Deck, Slide};
use serde::Serialize;

/// One entry of a `batchUpdate` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlidesRequest {
    DeleteObject(DeleteObject),
    CreateSlide(CreateSlide),
    InsertText(InsertText),
    UpdateTextStyle(UpdateTextStyle),
    CreateParagraphBullets(CreateParagraphBullets),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObject {
    pub object_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlide {
    pub object_id: String,
    pub slide_layout_reference: LayoutReference,
    pub placeholder_id_mappings: Vec<PlaceholderMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    pub predefined_layout: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderMapping {
    pub layout_placeholder: Placeholder,
    pub object_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertText {
    pub object_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    pub object_id: String,
    pub style: TextStyle,
    pub fields: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    pub opaque_color: OpaqueColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    pub rgb_color: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl From<(f32, f32, f32)> for RgbColor {
    fn from((red, green, blue): (f32, f32, f32)) -> Self {
        Self { red, green, blue }
    }
}

impl RgbColor {
    fn opaque(self) -> OptionalColor {
        OptionalColor {
            opaque_color: OpaqueColor { rgb_color: self },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub magnitude: f32,
    pub unit: &'static str,
}

impl Dimension {
    fn points(magnitude: f32) -> Self {
        Self {
            magnitude,
            unit: "PT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBullets {
    pub object_id: String,
    pub text_range: TextRange,
    pub bullet_preset: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub start_index: usize,
    pub end_index: usize,
}

/// Accent color for the title of the slide at `index`.
pub fn title_color(index: usize) -> RgbColor {
    TITLE_PALETTE[index % TITLE_PALETTE.len()].into()
}

/// Body text as inserted: markers removed, one trimmed line per bullet.
pub fn body_text(slide: &Slide) -> String {
    slide
        .bullet_lines()
        .map(|line| line.trim_start_matches(BULLET_MARKER).trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(&BULLET_DELIMITER.to_string())
}

/// Bullet ranges over `body`, in UTF-16 code units as the Slides API counts.
pub fn bullet_ranges(body: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for line in body.split(BULLET_DELIMITER) {
        let len = line.encode_utf16().count();
        if len > 0 {
            ranges.push((start, start + len));
        }
        start += len + 1;
    }
    ranges
}

/// Builds the full request list for a deck.
///
/// When `placeholder_slide` is given it is deleted first.
pub fn build_batch_requests(deck: &Deck, placeholder_slide: Option<&str>) -> Vec<SlidesRequest> {
    let mut requests = Vec::new();

    if let Some(object_id) = placeholder_slide {
        requests.push(SlidesRequest::DeleteObject(DeleteObject {
            object_id: object_id.to_string(),
        }));
    }

    for (index, slide) in deck.slides.iter().enumerate() {
        push_slide_requests(&mut requests, index, slide);
    }

    requests
}

fn push_slide_requests(requests: &mut Vec<SlidesRequest>, index: usize, slide: &Slide) {
    let slide_id = format!("slide_{}", index);
    let title_id = format!("title_{}", index);
    let body_id = format!("body_{}", index);

    requests.push(SlidesRequest::CreateSlide(CreateSlide {
        object_id: slide_id,
        slide_layout_reference: LayoutReference {
            predefined_layout: "TITLE_AND_BODY",
        },
        placeholder_id_mappings: vec![
            PlaceholderMapping {
                layout_placeholder: Placeholder { kind: "TITLE" },
                object_id: title_id.clone(),
            },
            PlaceholderMapping {
                layout_placeholder: Placeholder { kind: "BODY" },
                object_id: body_id.clone(),
            },
        ],
    }));

    if !slide.title.is_empty() {
        requests.push(SlidesRequest::InsertText(InsertText {
            object_id: title_id.clone(),
            text: slide.title.clone(),
        }));
        requests.push(SlidesRequest::UpdateTextStyle(UpdateTextStyle {
            object_id: title_id,
            style: TextStyle {
                foreground_color: Some(title_color(index).opaque()),
                bold: Some(true),
                font_size: Some(Dimension::points(TITLE_FONT_SIZE_PT)),
            },
            fields: "foregroundColor,bold,fontSize",
        }));
    }

    // The API rejects text operations on an empty shape.
    let body = body_text(slide);
    if body.is_empty() {
        return;
    }

    let ranges = bullet_ranges(&body);
    requests.push(SlidesRequest::InsertText(InsertText {
        object_id: body_id.clone(),
        text: body,
    }));
    requests.push(SlidesRequest::UpdateTextStyle(UpdateTextStyle {
        object_id: body_id.clone(),
        style: TextStyle {
            foreground_color: Some(RgbColor::from(BODY_TEXT_COLOR).opaque()),
            bold: None,
            font_size: Some(Dimension::points(BODY_FONT_SIZE_PT)),
        },
        fields: "fontSize,foregroundColor",
    }));

    for (start_index, end_index) in ranges {
        requests.push(SlidesRequest::CreateParagraphBullets(CreateParagraphBullets {
            object_id: body_id.clone(),
            text_range: TextRange {
                kind: "FIXED_RANGE",
                start_index,
                end_index,
            },
            bullet_preset: BULLET_PRESET,
        }));
    }
}
