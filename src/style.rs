//! Theme stylesheets – assign colors, fonts, and spacing to visual nodes,
//! producing the styled box tree consumed by the layout engine.
//!
//! Each theme maps the same node vocabulary to a different [`Stylesheet`];
//! the builder below is shared, so theme differences stay in data.

use crate::node::{EntryBlock, Node, RegionKind, VisualDocument};

// ---------------------------------------------------------------------------
// Computed style
// ---------------------------------------------------------------------------

/// Fully resolved style for a single box.
#[derive(Debug, Clone)]
pub struct ComputedStyle {
    pub display: Display,
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub gap: f32,

    pub width: Dimension,
    pub height: Dimension,

    // Spacing (pt)
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,

    pub border_width: f32,
    pub border_color: Color,

    // Typography
    pub font_size: f32,
    pub font_family: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Color,
    pub text_align: TextAlign,
    pub line_height: f32,

    pub background_color: Color,

    /// Pagination hint: keep this box on a single page when possible.
    pub break_inside_avoid: bool,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            flex_direction: FlexDirection::Column,
            flex_wrap: FlexWrap::NoWrap,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            justify_content: JustifyContent::Start,
            align_items: AlignItems::Stretch,
            gap: 0.0,
            width: Dimension::Auto,
            height: Dimension::Auto,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            padding_top: 0.0,
            padding_right: 0.0,
            padding_bottom: 0.0,
            padding_left: 0.0,
            border_width: 0.0,
            border_color: Color::BLACK,
            font_size: 10.5,
            font_family: "Helvetica".to_string(),
            bold: false,
            italic: false,
            underline: false,
            color: Color::BLACK,
            text_align: TextAlign::Left,
            line_height: 1.4,
            background_color: Color::TRANSPARENT,
            break_inside_avoid: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    Flex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexWrap {
    NoWrap,
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JustifyContent {
    Start,
    Center,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignItems {
    Start,
    Center,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Auto,
    Pt(f32),
    Percent(f32),
}

/// RGBA colour (0.0 – 1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn is_transparent(&self) -> bool {
        self.a < 0.001
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
            Some(Self { r, g, b, a: 1.0 })
        } else {
            None
        }
    }

    fn hex(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::BLACK)
    }
}

// ---------------------------------------------------------------------------
// Stylesheets
// ---------------------------------------------------------------------------

/// Per-theme visual constants.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    pub accent: Color,
    pub body_color: Color,
    pub muted_color: Color,
    pub link_color: Color,
    pub chip_bg: Color,
    pub chip_fg: Color,
    pub sidebar_bg: Color,
    pub sidebar_fg: Color,
    pub sidebar_muted: Color,
    pub base_size: f32,
    pub name_size: f32,
    pub section_title_size: f32,
    pub entry_heading_size: f32,
    pub center_header: bool,
    pub uppercase_section_titles: bool,
}

impl Stylesheet {
    pub fn for_theme(theme: crate::model::ThemeId) -> Self {
        use crate::model::ThemeId;
        match theme {
            ThemeId::Corporate => Self {
                accent: Color::hex("#1a365d"),
                body_color: Color::hex("#1f2933"),
                muted_color: Color::hex("#6b7280"),
                link_color: Color::hex("#3498db"),
                chip_bg: Color::hex("#e5e7eb"),
                chip_fg: Color::hex("#111827"),
                sidebar_bg: Color::TRANSPARENT,
                sidebar_fg: Color::BLACK,
                sidebar_muted: Color::BLACK,
                base_size: 10.5,
                name_size: 26.0,
                section_title_size: 14.0,
                entry_heading_size: 12.0,
                center_header: true,
                uppercase_section_titles: false,
            },
            ThemeId::Modern => Self {
                accent: Color::hex("#16a085"),
                body_color: Color::hex("#1f2933"),
                muted_color: Color::hex("#6b7280"),
                link_color: Color::hex("#16a085"),
                chip_bg: Color::hex("#3d566e"),
                chip_fg: Color::hex("#ecf0f1"),
                sidebar_bg: Color::hex("#2c3e50"),
                sidebar_fg: Color::hex("#ecf0f1"),
                sidebar_muted: Color::hex("#bdc3c7"),
                base_size: 10.5,
                name_size: 24.0,
                section_title_size: 13.0,
                entry_heading_size: 12.0,
                center_header: false,
                uppercase_section_titles: false,
            },
            ThemeId::Academic => Self {
                accent: Color::BLACK,
                body_color: Color::hex("#111827"),
                muted_color: Color::hex("#374151"),
                link_color: Color::hex("#1a365d"),
                chip_bg: Color::hex("#f3f4f6"),
                chip_fg: Color::hex("#111827"),
                sidebar_bg: Color::TRANSPARENT,
                sidebar_fg: Color::BLACK,
                sidebar_muted: Color::BLACK,
                base_size: 10.5,
                name_size: 22.0,
                section_title_size: 12.0,
                entry_heading_size: 11.5,
                center_header: true,
                uppercase_section_titles: true,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Styled tree
// ---------------------------------------------------------------------------

/// A visual node resolved against a stylesheet, ready for layout.
#[derive(Debug, Clone)]
pub enum StyledNode {
    Box {
        style: ComputedStyle,
        children: Vec<StyledNode>,
    },
    Text {
        text: String,
        style: ComputedStyle,
        /// Bullet marker drawn in the left gutter, when present.
        marker: Option<String>,
    },
    Image {
        src: String,
        style: ComputedStyle,
    },
}

/// Text colour context; the Modern sidebar inverts it.
#[derive(Debug, Clone, Copy)]
struct Palette {
    fg: Color,
    muted: Color,
    heading: Color,
    centered: bool,
}

/// Resolve a visual document against its theme stylesheet.
pub fn build_styled_tree(doc: &VisualDocument) -> Vec<StyledNode> {
    let sheet = Stylesheet::for_theme(doc.theme);
    let builder = Builder { sheet: &sheet };
    let base = Palette {
        fg: sheet.body_color,
        muted: sheet.muted_color,
        heading: sheet.accent,
        centered: false,
    };

    let has_sidebar = doc
        .children
        .iter()
        .any(|n| matches!(n, Node::Region { kind: RegionKind::Sidebar, .. }));
    if has_sidebar {
        vec![builder.two_column(&doc.children, base)]
    } else {
        doc.children
            .iter()
            .map(|n| builder.node(n, base))
            .collect()
    }
}

struct Builder<'a> {
    sheet: &'a Stylesheet,
}

impl<'a> Builder<'a> {
    /// Sidebar + main regions compose into a single flex row.
    fn two_column(&self, nodes: &[Node], base: Palette) -> StyledNode {
        let mut row_children = Vec::new();
        for node in nodes {
            if let Node::Region { kind, children } = node {
                row_children.push(match kind {
                    RegionKind::Sidebar => self.sidebar(children),
                    _ => self.main_column(children, base),
                });
            }
        }
        let style = ComputedStyle {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Start,
            gap: 18.0,
            ..ComputedStyle::default()
        };
        StyledNode::Box {
            style,
            children: row_children,
        }
    }

    fn sidebar(&self, children: &[Node]) -> StyledNode {
        let palette = Palette {
            fg: self.sheet.sidebar_fg,
            muted: self.sheet.sidebar_muted,
            heading: self.sheet.sidebar_fg,
            centered: false,
        };
        let style = ComputedStyle {
            width: Dimension::Percent(32.0),
            flex_shrink: 0.0,
            padding_top: 16.0,
            padding_right: 12.0,
            padding_bottom: 16.0,
            padding_left: 12.0,
            background_color: self.sheet.sidebar_bg,
            ..ComputedStyle::default()
        };
        StyledNode::Box {
            style,
            children: children.iter().map(|n| self.node(n, palette)).collect(),
        }
    }

    fn main_column(&self, children: &[Node], palette: Palette) -> StyledNode {
        let style = ComputedStyle {
            flex_grow: 1.0,
            ..ComputedStyle::default()
        };
        StyledNode::Box {
            style,
            children: children.iter().map(|n| self.node(n, palette)).collect(),
        }
    }

    fn node(&self, node: &Node, palette: Palette) -> StyledNode {
        match node {
            Node::Region { kind, children } => self.region(*kind, children, palette),
            Node::Section { title, children } => self.section(title, children, palette),
            Node::Heading { level: 1, text } => self.name(text, palette),
            Node::Heading { text, .. } => StyledNode::Text {
                text: text.clone(),
                style: ComputedStyle {
                    font_size: self.sheet.section_title_size,
                    bold: true,
                    color: palette.heading,
                    margin_bottom: 4.0,
                    ..ComputedStyle::default()
                },
                marker: None,
            },
            Node::Paragraph(text) => StyledNode::Text {
                text: text.clone(),
                style: ComputedStyle {
                    font_size: self.sheet.base_size,
                    color: palette.fg,
                    line_height: 1.5,
                    ..ComputedStyle::default()
                },
                marker: None,
            },
            Node::BulletList(items) => self.bullet_list(items, palette),
            Node::ChipSet(items) => self.chip_set(items),
            Node::Photo { src, size_pt } => StyledNode::Image {
                src: src.clone(),
                style: ComputedStyle {
                    width: Dimension::Pt(*size_pt),
                    height: Dimension::Pt(*size_pt),
                    margin_bottom: 10.0,
                    ..ComputedStyle::default()
                },
            },
            Node::Contact { items, .. } => self.contact(items, palette),
            Node::Entry(block) => self.entry(block, palette),
        }
    }

    fn region(&self, kind: RegionKind, children: &[Node], palette: Palette) -> StyledNode {
        let palette = Palette {
            centered: kind == RegionKind::Header && self.sheet.center_header,
            ..palette
        };
        let style = ComputedStyle {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            align_items: if palette.centered {
                AlignItems::Center
            } else {
                AlignItems::Stretch
            },
            margin_bottom: if kind == RegionKind::Header { 14.0 } else { 0.0 },
            ..ComputedStyle::default()
        };
        StyledNode::Box {
            style,
            children: children.iter().map(|n| self.node(n, palette)).collect(),
        }
    }

    fn section(&self, title: &str, children: &[Node], palette: Palette) -> StyledNode {
        let title_text = if self.sheet.uppercase_section_titles {
            title.to_uppercase()
        } else {
            title.to_string()
        };
        let mut styled = vec![StyledNode::Text {
            text: title_text,
            style: ComputedStyle {
                font_size: self.sheet.section_title_size,
                bold: true,
                color: palette.heading,
                margin_bottom: 6.0,
                ..ComputedStyle::default()
            },
            marker: None,
        }];
        styled.extend(children.iter().map(|n| self.node(n, palette)));
        StyledNode::Box {
            style: ComputedStyle {
                margin_bottom: 14.0,
                ..ComputedStyle::default()
            },
            children: styled,
        }
    }

    fn name(&self, text: &str, palette: Palette) -> StyledNode {
        StyledNode::Text {
            text: text.to_string(),
            style: ComputedStyle {
                font_size: self.sheet.name_size,
                bold: true,
                color: palette.heading,
                text_align: if palette.centered {
                    TextAlign::Center
                } else {
                    TextAlign::Left
                },
                margin_bottom: 6.0,
                line_height: 1.2,
                ..ComputedStyle::default()
            },
            marker: None,
        }
    }

    fn bullet_list(&self, items: &[String], palette: Palette) -> StyledNode {
        let children = items
            .iter()
            .map(|item| StyledNode::Text {
                text: item.clone(),
                style: ComputedStyle {
                    font_size: self.sheet.base_size,
                    color: palette.fg,
                    margin_bottom: 3.0,
                    ..ComputedStyle::default()
                },
                marker: Some("\u{2022} ".to_string()),
            })
            .collect();
        StyledNode::Box {
            style: ComputedStyle {
                padding_left: 16.0,
                ..ComputedStyle::default()
            },
            children,
        }
    }

    fn chip_set(&self, items: &[String]) -> StyledNode {
        let children = items
            .iter()
            .map(|item| StyledNode::Text {
                text: item.clone(),
                style: ComputedStyle {
                    font_size: self.sheet.base_size - 1.0,
                    color: self.sheet.chip_fg,
                    background_color: self.sheet.chip_bg,
                    padding_top: 2.0,
                    padding_right: 7.0,
                    padding_bottom: 2.0,
                    padding_left: 7.0,
                    ..ComputedStyle::default()
                },
                marker: None,
            })
            .collect();
        StyledNode::Box {
            style: ComputedStyle {
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                flex_wrap: FlexWrap::Wrap,
                gap: 5.0,
                ..ComputedStyle::default()
            },
            children,
        }
    }

    fn contact(&self, items: &[crate::node::ContactItem], palette: Palette) -> StyledNode {
        let children = items
            .iter()
            .map(|item| StyledNode::Text {
                text: item.label.clone(),
                style: ComputedStyle {
                    font_size: self.sheet.base_size - 0.5,
                    color: palette.muted,
                    margin_bottom: 2.0,
                    ..ComputedStyle::default()
                },
                marker: None,
            })
            .collect();
        StyledNode::Box {
            style: ComputedStyle {
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                flex_wrap: FlexWrap::Wrap,
                justify_content: if palette.centered {
                    JustifyContent::Center
                } else {
                    JustifyContent::Start
                },
                gap: 10.0,
                ..ComputedStyle::default()
            },
            children,
        }
    }

    fn entry(&self, block: &EntryBlock, palette: Palette) -> StyledNode {
        let heading = StyledNode::Text {
            text: block.heading.clone(),
            style: ComputedStyle {
                font_size: self.sheet.entry_heading_size,
                bold: true,
                color: palette.fg,
                ..ComputedStyle::default()
            },
            marker: None,
        };
        let subheading = block.subheading.as_ref().map(|sub| StyledNode::Text {
            text: sub.clone(),
            style: ComputedStyle {
                font_size: self.sheet.base_size,
                italic: true,
                color: palette.muted,
                ..ComputedStyle::default()
            },
            marker: None,
        });

        let mut children = Vec::new();
        match &block.dates {
            Some(dates) => {
                let mut left = vec![heading];
                left.extend(subheading);
                let left_box = StyledNode::Box {
                    style: ComputedStyle {
                        flex_grow: 1.0,
                        ..ComputedStyle::default()
                    },
                    children: left,
                };
                let date_text = StyledNode::Text {
                    text: dates.clone(),
                    style: ComputedStyle {
                        font_size: self.sheet.base_size - 0.5,
                        color: palette.muted,
                        text_align: TextAlign::Right,
                        ..ComputedStyle::default()
                    },
                    marker: None,
                };
                children.push(StyledNode::Box {
                    style: ComputedStyle {
                        display: Display::Flex,
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                        align_items: AlignItems::Start,
                        gap: 8.0,
                        ..ComputedStyle::default()
                    },
                    children: vec![left_box, date_text],
                });
            }
            None => {
                children.push(heading);
                children.extend(subheading);
            }
        }

        if let Some(description) = &block.description {
            children.push(StyledNode::Text {
                text: description.clone(),
                style: ComputedStyle {
                    font_size: self.sheet.base_size,
                    color: palette.fg,
                    line_height: 1.45,
                    margin_top: 3.0,
                    ..ComputedStyle::default()
                },
                marker: None,
            });
        }
        if block.link.is_some() {
            children.push(StyledNode::Text {
                text: "View Project".to_string(),
                style: ComputedStyle {
                    font_size: self.sheet.base_size,
                    color: self.sheet.link_color,
                    underline: true,
                    margin_top: 3.0,
                    ..ComputedStyle::default()
                },
                marker: None,
            });
        }

        StyledNode::Box {
            style: ComputedStyle {
                margin_bottom: 10.0,
                break_inside_avoid: true,
                ..ComputedStyle::default()
            },
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ThemeId;
    use crate::theme::render_theme;

    fn count_text(nodes: &[StyledNode], pred: &dyn Fn(&ComputedStyle, &str) -> bool) -> usize {
        let mut n = 0;
        for node in nodes {
            match node {
                StyledNode::Text { text, style, .. } => {
                    if pred(style, text) {
                        n += 1;
                    }
                }
                StyledNode::Box { children, .. } => n += count_text(children, pred),
                StyledNode::Image { .. } => {}
            }
        }
        n
    }

    #[test]
    fn color_from_hex() {
        let c = Color::from_hex("#ff8800").unwrap();
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.533).abs() < 0.01);
        assert!(Color::from_hex("nope").is_none());
    }

    #[test]
    fn modern_builds_single_row_root() {
        let doc = render_theme(ThemeId::Modern, &crate::samples::sample_document());
        let styled = build_styled_tree(&doc);
        assert_eq!(styled.len(), 1);
        match &styled[0] {
            StyledNode::Box { style, children } => {
                assert_eq!(style.flex_direction, FlexDirection::Row);
                assert_eq!(children.len(), 2);
            }
            _ => panic!("expected row box"),
        }
    }

    #[test]
    fn sidebar_text_uses_inverted_palette() {
        let doc = render_theme(ThemeId::Modern, &crate::samples::sample_document());
        let styled = build_styled_tree(&doc);
        let sheet = Stylesheet::for_theme(ThemeId::Modern);
        let inverted = count_text(&styled, &|style, _| style.color == sheet.sidebar_fg);
        assert!(inverted > 0, "sidebar should carry light-on-dark text");
    }

    #[test]
    fn academic_uppercases_section_titles() {
        let doc = render_theme(ThemeId::Academic, &crate::samples::sample_document());
        let styled = build_styled_tree(&doc);
        assert_eq!(count_text(&styled, &|_, t| t == "OBJECTIVE"), 1);
        assert_eq!(count_text(&styled, &|_, t| t == "Objective"), 0);
    }

    #[test]
    fn link_label_is_underlined() {
        let doc = render_theme(ThemeId::Corporate, &crate::samples::sample_document());
        let styled = build_styled_tree(&doc);
        assert!(count_text(&styled, &|style, t| t == "View Project" && style.underline) > 0);
    }
}
