use super::geometry::{arrow_strokes, Point, Segment};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LINE_WIDTH: u32 = 2;
pub const MAX_LINE_WIDTH: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Arrow,
}

/// Opaque stroke colour, written `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color { r: 0xFF, g: 0, b: 0 };

    pub fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

impl FromStr for Color {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(AppError::invalid(format!("invalid colour: {}", s)));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| AppError::invalid(format!("invalid colour: {}", s)))
        };
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCommand {
    pub tool: Tool,
    pub color: Color,
    pub width: u32,
    pub from: Point,
    pub to: Point,
}

impl DrawCommand {
    pub fn segments(&self) -> Vec<Segment> {
        match self.tool {
            Tool::Pen => vec![Segment::new(self.from, self.to)],
            Tool::Arrow => arrow_strokes(self.from, self.to).to_vec(),
        }
    }
}

/// Pointer input as delivered by the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
}

/// Drawing state of one annotation session over a `width` x `height` image.
///
/// The pen commits one command per pointer move. The arrow keeps a single
/// preview that each move replaces and that is committed on pointer up.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sketch {
    width: u32,
    height: u32,
    tool: Tool,
    color: Color,
    line_width: u32,
    commands: Vec<DrawCommand>,
    preview: Option<DrawCommand>,
    #[serde(skip)]
    anchor: Option<Point>,
    #[serde(skip)]
    gestures: Vec<usize>,
}

impl Sketch {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tool: Tool::default(),
            color: Color::default(),
            line_width: DEFAULT_LINE_WIDTH,
            commands: Vec::new(),
            preview: None,
            anchor: None,
            gestures: Vec::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Clamped to 1..=10.
    pub fn set_line_width(&mut self, width: u32) {
        self.line_width = width.clamp(1, MAX_LINE_WIDTH);
    }

    pub fn is_drawing(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn preview(&self) -> Option<&DrawCommand> {
        self.preview.as_ref()
    }

    /// Committed commands followed by the live arrow preview, in paint order.
    pub fn visible(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().chain(self.preview.iter())
    }

    /// Pins a pointer position to the image; `None` for non-finite input.
    fn on_canvas(&self, at: Point) -> Option<Point> {
        if !(at.x.is_finite() && at.y.is_finite()) {
            return None;
        }
        Some(Point::new(
            at.x.clamp(0.0, self.width as f64),
            at.y.clamp(0.0, self.height as f64),
        ))
    }

    pub fn pointer_down(&mut self, at: Point) {
        let Some(at) = self.on_canvas(at) else {
            return;
        };
        // A down without the matching up leaves an open gesture behind
        if self.is_drawing() && self.gestures.last() == Some(&self.commands.len()) {
            self.gestures.pop();
        }
        self.anchor = Some(at);
        self.preview = None;
        self.gestures.push(self.commands.len());
    }

    pub fn pointer_move(&mut self, at: Point) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let Some(at) = self.on_canvas(at) else {
            return;
        };
        let command = DrawCommand {
            tool: self.tool,
            color: self.color,
            width: self.line_width,
            from: anchor,
            to: at,
        };
        match self.tool {
            Tool::Pen => {
                self.commands.push(command);
                self.anchor = Some(at);
            }
            Tool::Arrow => self.preview = Some(command),
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(arrow) = self.preview.take() {
            self.commands.push(arrow);
        }
        self.anchor = None;
        if self.gestures.last() == Some(&self.commands.len()) {
            // Nothing was drawn between down and up
            self.gestures.pop();
        }
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(Point::new(x, y)),
            PointerEvent::Move { x, y } => self.pointer_move(Point::new(x, y)),
            PointerEvent::Up => self.pointer_up(),
        }
    }

    /// Removes the last completed gesture. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        if self.is_drawing() {
            return false;
        }
        match self.gestures.pop() {
            Some(start) => {
                self.commands.truncate(start);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.gestures.clear();
        self.preview = None;
        self.anchor = None;
    }
}
