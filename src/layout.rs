//! Layout engine – uses Taffy to compute flexbox layout for a styled box
//! tree, then converts the result into positioned boxes in document
//! coordinates (a single tall column, pre-pagination).

use std::collections::HashMap;
use taffy::prelude::*;

use crate::fonts::{wrap_text, FontLibrary};
use crate::style::{self, ComputedStyle, StyledNode};

// ---------------------------------------------------------------------------
// Positioned boxes (pre-pagination)
// ---------------------------------------------------------------------------

/// A box with resolved position and size in document coordinates.
#[derive(Debug, Clone)]
pub struct PositionedBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub style: ComputedStyle,
    pub content: BoxContent,
    pub children: Vec<PositionedBox>,
}

#[derive(Debug, Clone)]
pub enum BoxContent {
    None,
    Text {
        /// Pre-wrapped lines.
        lines: Vec<String>,
        /// Bullet marker for list items.
        marker: Option<String>,
    },
    Image {
        src: String,
    },
}

// ---------------------------------------------------------------------------
// Taffy tree construction
// ---------------------------------------------------------------------------

struct LayoutBuilder<'a> {
    taffy: TaffyTree<()>,
    fonts: &'a FontLibrary,
    node_styles: HashMap<NodeId, ComputedStyle>,
    node_content: HashMap<NodeId, BoxContent>,
}

impl<'a> LayoutBuilder<'a> {
    fn new(fonts: &'a FontLibrary) -> Self {
        Self {
            taffy: TaffyTree::new(),
            fonts,
            node_styles: HashMap::new(),
            node_content: HashMap::new(),
        }
    }

    fn build_node(&mut self, styled: &StyledNode, parent_width: f32) -> NodeId {
        match styled {
            StyledNode::Text {
                text,
                style,
                marker,
            } => self.build_text(text, style, marker.clone(), parent_width),
            StyledNode::Image { src, style } => self.build_image(src, style),
            StyledNode::Box { style, children } => self.build_box(style, children, parent_width),
        }
    }

    fn build_text(
        &mut self,
        text: &str,
        style: &ComputedStyle,
        marker: Option<String>,
        parent_width: f32,
    ) -> NodeId {
        let line_height = self.fonts.line_height(style.font_size, style.line_height);
        let max_width = parent_width.max(1.0);
        let lines = wrap_text(
            text,
            style.font_size,
            style.bold,
            style.italic,
            &style.font_family,
            max_width,
            self.fonts,
        );

        let text_width = lines
            .iter()
            .map(|l| {
                self.fonts.text_width(
                    l,
                    style.font_size,
                    style.bold,
                    style.italic,
                    &style.font_family,
                )
            })
            .fold(0.0f32, f32::max);
        let text_height = lines.len() as f32 * line_height;

        let taffy_style = Style {
            size: Size {
                width: Dimension::Length(
                    text_width + style.padding_left + style.padding_right,
                ),
                height: Dimension::Length(
                    text_height + style.padding_top + style.padding_bottom,
                ),
            },
            margin: margin_rect(style),
            ..Default::default()
        };

        let node = self.taffy.new_leaf(taffy_style).unwrap();
        self.node_styles.insert(node, style.clone());
        self.node_content
            .insert(node, BoxContent::Text { lines, marker });
        node
    }

    fn build_image(&mut self, src: &str, style: &ComputedStyle) -> NodeId {
        let taffy_style = Style {
            size: Size {
                width: dim_to_taffy(style.width),
                height: dim_to_taffy(style.height),
            },
            margin: margin_rect(style),
            flex_shrink: 0.0,
            ..Default::default()
        };
        let node = self.taffy.new_leaf(taffy_style).unwrap();
        self.node_styles.insert(node, style.clone());
        self.node_content.insert(
            node,
            BoxContent::Image {
                src: src.to_string(),
            },
        );
        node
    }

    fn build_box(
        &mut self,
        style: &ComputedStyle,
        children: &[StyledNode],
        parent_width: f32,
    ) -> NodeId {
        let my_width = match style.width {
            style::Dimension::Pt(w) => w,
            style::Dimension::Percent(p) => parent_width * p / 100.0,
            style::Dimension::Auto => parent_width,
        };
        let inner_width = (my_width - style.padding_left - style.padding_right).max(1.0);

        let is_row = style.display == style::Display::Flex
            && style.flex_direction == style::FlexDirection::Row;

        // Wrap width for each row child: an explicitly sized child gets its
        // own width, the rest share what remains equally. Column children
        // wrap to the full inner width.
        let child_widths: Vec<f32> = if is_row {
            let sized: Vec<Option<f32>> = children
                .iter()
                .map(|c| match child_style(c).width {
                    style::Dimension::Pt(w) => Some(w),
                    style::Dimension::Percent(p) => Some(inner_width * p / 100.0),
                    style::Dimension::Auto => None,
                })
                .collect();
            let claimed: f32 = sized.iter().flatten().sum();
            let unsized_count = sized.iter().filter(|w| w.is_none()).count().max(1);
            let gap_total = style.gap * children.len().saturating_sub(1) as f32;
            let share = ((inner_width - claimed - gap_total) / unsized_count as f32).max(1.0);
            sized.into_iter().map(|w| w.unwrap_or(share)).collect()
        } else {
            vec![inner_width; children.len()]
        };

        let child_nodes: Vec<NodeId> = children
            .iter()
            .zip(child_widths)
            .map(|(child, width)| self.build_node(child, width))
            .collect();

        let taffy_style = computed_to_taffy(style);
        let node = self
            .taffy
            .new_with_children(taffy_style, &child_nodes)
            .unwrap();
        self.node_styles.insert(node, style.clone());
        node
    }

    /// Extract positioned boxes after layout, accumulating absolute
    /// document coordinates.
    fn extract(&self, node: NodeId, offset_x: f32, offset_y: f32) -> PositionedBox {
        let layout = self.taffy.layout(node).unwrap();
        let style = self.node_styles.get(&node).cloned().unwrap_or_default();
        let content = self
            .node_content
            .get(&node)
            .cloned()
            .unwrap_or(BoxContent::None);

        let x = offset_x + layout.location.x;
        let y = offset_y + layout.location.y;

        let children: Vec<PositionedBox> = self
            .taffy
            .children(node)
            .unwrap_or_default()
            .iter()
            .map(|&child| self.extract(child, x, y))
            .collect();

        PositionedBox {
            x,
            y,
            width: layout.size.width,
            height: layout.size.height,
            style,
            content,
            children,
        }
    }
}

fn child_style(node: &StyledNode) -> &ComputedStyle {
    match node {
        StyledNode::Box { style, .. }
        | StyledNode::Text { style, .. }
        | StyledNode::Image { style, .. } => style,
    }
}

fn computed_to_taffy(s: &ComputedStyle) -> Style {
    let mut ts = Style::default();

    match s.display {
        style::Display::Flex => {
            ts.display = taffy::Display::Flex;
            ts.flex_direction = match s.flex_direction {
                style::FlexDirection::Row => taffy::FlexDirection::Row,
                style::FlexDirection::Column => taffy::FlexDirection::Column,
            };
            ts.flex_wrap = match s.flex_wrap {
                style::FlexWrap::NoWrap => taffy::FlexWrap::NoWrap,
                style::FlexWrap::Wrap => taffy::FlexWrap::Wrap,
            };
            ts.justify_content = Some(match s.justify_content {
                style::JustifyContent::Start => taffy::JustifyContent::Start,
                style::JustifyContent::Center => taffy::JustifyContent::Center,
                style::JustifyContent::SpaceBetween => taffy::JustifyContent::SpaceBetween,
            });
            ts.align_items = Some(match s.align_items {
                style::AlignItems::Start => taffy::AlignItems::Start,
                style::AlignItems::Center => taffy::AlignItems::Center,
                style::AlignItems::Stretch => taffy::AlignItems::Stretch,
            });
        }
        style::Display::Block => {
            // Block-level boxes stack vertically: model as flex column.
            ts.display = taffy::Display::Flex;
            ts.flex_direction = taffy::FlexDirection::Column;
        }
    }

    ts.size = Size {
        width: dim_to_taffy(s.width),
        height: dim_to_taffy(s.height),
    };
    // Let flexible items compress below their natural content size.
    ts.min_size = Size {
        width: if s.flex_shrink > 0.0 || s.flex_grow > 0.0 {
            taffy::Dimension::Length(0.0)
        } else {
            taffy::Dimension::Auto
        },
        height: taffy::Dimension::Auto,
    };

    ts.flex_grow = s.flex_grow;
    ts.flex_shrink = s.flex_shrink;

    ts.margin = margin_rect(s);
    ts.padding = Rect {
        top: LengthPercentage::Length(s.padding_top),
        right: LengthPercentage::Length(s.padding_right),
        bottom: LengthPercentage::Length(s.padding_bottom),
        left: LengthPercentage::Length(s.padding_left),
    };
    ts.border = Rect {
        top: LengthPercentage::Length(s.border_width),
        right: LengthPercentage::Length(s.border_width),
        bottom: LengthPercentage::Length(s.border_width),
        left: LengthPercentage::Length(s.border_width),
    };
    ts.gap = Size {
        width: LengthPercentage::Length(s.gap),
        height: LengthPercentage::Length(s.gap),
    };

    ts
}

fn margin_rect(s: &ComputedStyle) -> Rect<LengthPercentageAuto> {
    Rect {
        top: LengthPercentageAuto::Length(s.margin_top),
        right: LengthPercentageAuto::Length(s.margin_right),
        bottom: LengthPercentageAuto::Length(s.margin_bottom),
        left: LengthPercentageAuto::Length(s.margin_left),
    }
}

fn dim_to_taffy(d: style::Dimension) -> taffy::Dimension {
    match d {
        style::Dimension::Auto => taffy::Dimension::Auto,
        style::Dimension::Pt(v) => taffy::Dimension::Length(v),
        style::Dimension::Percent(v) => taffy::Dimension::Percent(v / 100.0),
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute layout for a styled tree, returning top-level positioned boxes in
/// document coordinates. `page_margin` becomes the left offset of every box.
pub fn compute_layout(
    styled_nodes: &[StyledNode],
    page_width: f32,
    page_margin: f32,
    fonts: &FontLibrary,
) -> Vec<PositionedBox> {
    let content_width = page_width - 2.0 * page_margin;
    let mut builder = LayoutBuilder::new(fonts);

    let child_ids: Vec<NodeId> = styled_nodes
        .iter()
        .map(|node| builder.build_node(node, content_width))
        .collect();

    let root_style = Style {
        display: taffy::Display::Flex,
        flex_direction: taffy::FlexDirection::Column,
        size: Size {
            width: taffy::Dimension::Length(content_width),
            height: taffy::Dimension::Auto,
        },
        ..Default::default()
    };
    let root = builder
        .taffy
        .new_with_children(root_style, &child_ids)
        .unwrap();

    builder
        .taffy
        .compute_layout(
            root,
            Size {
                width: AvailableSpace::Definite(content_width),
                height: AvailableSpace::MaxContent,
            },
        )
        .unwrap();

    let root_box = builder.extract(root, page_margin, 0.0);
    root_box.children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ThemeId;
    use crate::style::build_styled_tree;
    use crate::theme::render_theme;

    #[test]
    fn layout_produces_positive_boxes() {
        let doc = render_theme(ThemeId::Corporate, &crate::samples::minimal_document());
        let styled = build_styled_tree(&doc);
        let fonts = FontLibrary::default();
        let boxes = compute_layout(&styled, 595.28, 40.0, &fonts);
        assert!(!boxes.is_empty());
        for b in &boxes {
            assert!(b.width > 0.0);
            assert!(b.height > 0.0);
        }
    }

    #[test]
    fn boxes_stay_within_content_width() {
        let doc = render_theme(ThemeId::Modern, &crate::samples::sample_document());
        let styled = build_styled_tree(&doc);
        let fonts = FontLibrary::default();
        let boxes = compute_layout(&styled, 595.28, 40.0, &fonts);
        let content_right = 595.28 - 40.0;
        for b in &boxes {
            assert!(
                b.x + b.width <= content_right + 1.0,
                "box ends at {} beyond {}",
                b.x + b.width,
                content_right
            );
        }
    }

    #[test]
    fn later_sections_sit_lower() {
        let doc = render_theme(ThemeId::Academic, &crate::samples::sample_document());
        let styled = build_styled_tree(&doc);
        let fonts = FontLibrary::default();
        let boxes = compute_layout(&styled, 595.28, 40.0, &fonts);
        assert!(boxes.len() >= 2);
        for pair in boxes.windows(2) {
            assert!(pair[1].y >= pair[0].y);
        }
    }
}
