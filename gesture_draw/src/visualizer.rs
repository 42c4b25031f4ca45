//! Software-rendered window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ [■] swatch                                    HOLD: CIRCLE       │
//! │                                               BRUSH: DASHED      │
//! │                                                                  │
//! │            persistent canvas  +  landmark dots                   │
//! │                                                                  │
//! │ status bar                                                       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every overlay is drawn into a per-frame copy of the canvas; the canvas
//! itself is only ever touched by the session.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use hand_canvas::{landmark, Canvas, HoldCategory, RenderCommand, UserCommand};

use crate::error::AppError;
use crate::perception::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const SWATCH:        (i32, i32, i32, i32) = (10, 10, 30, 30);
const HOLD_TEXT:     (i32, i32) = (600, 20);
const BRUSH_TEXT:    (i32, i32) = (600, 50);
const OVERLAY_SCALE: i32 = 3;
const STATUS_SCALE:  i32 = 2;
const STATUS_H:      i32 = 22;
const DOT_RADIUS:    i32 = 3;
const SWATCH_EDGE:   u32 = 0xFF808080;
const HOLD_COLOR:    u32 = 0xFFFFD700;  // gold
const BRUSH_COLOR:   u32 = 0xFF00E5FF;
const JOINT_COLOR:   u32 = 0xFF30D060;
const TIP_COLOR:     u32 = 0xFFFF8040;
const TEXT_BG:       u32 = 0xFF0F3460;
const STATUS_COLOR:  u32 = 0xFFEEEEEE;

// ════════════════════════════════════════════════════════════════════════════
// Input
// ════════════════════════════════════════════════════════════════════════════

/// Everything the window saw since the last frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputBatch {
    pub commands: Vec<UserCommand>,
    pub sim:      SimInput,
}

/// One-shot key bindings.
pub fn command_for(key: Key) -> Option<UserCommand> {
    match key {
        Key::C                => Some(UserCommand::Clear),
        Key::S                => Some(UserCommand::Save),
        Key::T                => Some(UserCommand::ToggleThick),
        Key::B                => Some(UserCommand::CycleBrush),
        Key::Q | Key::Escape  => Some(UserCommand::Quit),
        _                     => None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    width:  usize,
    height: usize,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, fps: usize) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Gesture Draw",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.set_target_fps(fps.max(1));

        Ok(Visualizer {
            window,
            buf: vec![0; width * height],
            width,
            height,
        })
    }

    /// Key presses become commands; mouse and held keys feed the simulator.
    /// A closed window reports `Quit`.
    pub fn poll_input(&mut self) -> InputBatch {
        let mut batch = InputBatch::default();
        if !self.window.is_open() {
            batch.commands.push(UserCommand::Quit);
            return batch;
        }

        batch.commands.extend(
            self.window
                .get_keys_pressed(KeyRepeat::No)
                .into_iter()
                .filter_map(command_for),
        );

        let (w, h) = (self.width as f32, self.height as f32);
        batch.sim = SimInput {
            pointer: self
                .window
                .get_mouse_pos(MouseMode::Discard)
                .map(|(x, y)| (x / w, y / h)),
            drawing:      self.window.get_mouse_down(MouseButton::Left),
            circle:       self.window.is_key_down(Key::Key1),
            rect:         self.window.is_key_down(Key::Key2),
            rotate_thumb: self.window.is_key_down(Key::R),
        };
        batch
    }

    /// Present one frame: canvas plus this frame's overlays.
    pub fn render(
        &mut self,
        canvas:   &Canvas,
        commands: &[RenderCommand],
        status:   &str,
    ) -> Result<(), AppError> {
        compose(&mut self.buf, canvas, commands, status);
        self.window
            .update_with_buffer(&self.buf, self.width, self.height)
            .map_err(|e| AppError::Window(e.to_string()))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Composition (window-free)
// ════════════════════════════════════════════════════════════════════════════

/// Fill `buf` with `canvas` and draw the overlays over it.
pub fn compose(buf: &mut Vec<u32>, canvas: &Canvas, commands: &[RenderCommand], status: &str) {
    buf.clear();
    buf.extend_from_slice(canvas.pixels());
    let mut frame = Frame { buf, width: canvas.width() as i32, height: canvas.height() as i32 };

    for cmd in commands {
        match cmd {
            RenderCommand::Swatch(color) => {
                let (x, y, w, h) = SWATCH;
                frame.fill_rect(x - 1, y - 1, w + 2, h + 2, SWATCH_EDGE);
                frame.fill_rect(x, y, w, h, *color);
            }
            RenderCommand::Landmarks(hand) => {
                for (i, p) in hand.points().iter().enumerate() {
                    let (x, y) = p.to_pixel();
                    let color = if is_fingertip(i) { TIP_COLOR } else { JOINT_COLOR };
                    frame.fill_circle(x, y, DOT_RADIUS, color);
                }
            }
            RenderCommand::HoldPreview { category, label } => {
                let ((x, y), color) = match category {
                    HoldCategory::Tool  => (HOLD_TEXT, HOLD_COLOR),
                    HoldCategory::Brush => (BRUSH_TEXT, BRUSH_COLOR),
                };
                let text = format!("{}: {}", category.caption(), label.as_str());
                frame.draw_label(&text, x, y, OVERLAY_SCALE, color);
            }
            // Handled by the app loop.
            RenderCommand::SaveCanvas => {}
        }
    }

    // ── Status bar ──────────────────────────────────────────────────────────
    let top = frame.height - STATUS_H;
    frame.fill_rect(0, top, frame.width, STATUS_H, TEXT_BG);
    frame.draw_label(status, 10, top + 6, STATUS_SCALE, STATUS_COLOR);
}

fn is_fingertip(index: usize) -> bool {
    matches!(
        index,
        landmark::THUMB_TIP | landmark::INDEX_TIP | landmark::MIDDLE_TIP
            | landmark::RING_TIP | landmark::PINKY_TIP
    )
}

/// Clipped drawing into a borrowed ARGB buffer.
struct Frame<'a> {
    buf:    &'a mut Vec<u32>,
    width:  i32,
    height: i32,
}

impl Frame<'_> {
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.buf[(y * self.width + x) as usize] = color;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for row in y.max(0)..(y + h).min(self.height) {
            for col in x.max(0)..(x + w).min(self.width) {
                self.buf[(row * self.width + col) as usize] = color;
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Minimal bitmap font: 3×5 glyphs, each cell drawn `scale`×`scale`.
    fn draw_label(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            if cx + 3 * scale > self.width { break; }
            let bits = glyph(ch);
            for row in 0..5 {
                for col in 0..3 {
                    if glyph_cell(bits, col, row) {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

/// 3×5 glyphs packed five octal digits per glyph, one digit per row from
/// the top, high bit leftmost.  Sorted by char for `binary_search_by_key`.
const FONT: &[(char, u16)] = &[
    (' ', 0o00000), ('+', 0o02720), (',', 0o00024), ('-', 0o00700),
    ('.', 0o00002), ('/', 0o11244), ('0', 0o75557), ('1', 0o26227),
    ('2', 0o71747), ('3', 0o71717), ('4', 0o55711), ('5', 0o74717),
    ('6', 0o74757), ('7', 0o71111), ('8', 0o75757), ('9', 0o75717),
    (':', 0o02020), ('=', 0o07070), ('A', 0o75755), ('B', 0o65656),
    ('C', 0o74447), ('D', 0o65556), ('E', 0o74747), ('F', 0o74744),
    ('G', 0o74557), ('H', 0o55755), ('I', 0o72227), ('J', 0o11157),
    ('K', 0o55655), ('L', 0o44447), ('M', 0o57555), ('N', 0o75555),
    ('O', 0o75557), ('P', 0o75744), ('Q', 0o75571), ('R', 0o65655),
    ('S', 0o74717), ('T', 0o72222), ('U', 0o55557), ('V', 0o55522),
    ('W', 0o55575), ('X', 0o55255), ('Y', 0o55722), ('Z', 0o71247),
];

/// Stand-in for characters the font lacks: a centered dot.
const MISSING_GLYPH: u16 = 0o00200;

/// Lowercase renders as uppercase.
fn glyph(c: char) -> u16 {
    let c = c.to_ascii_uppercase();
    FONT.binary_search_by_key(&c, |&(k, _)| k)
        .map_or(MISSING_GLYPH, |i| FONT[i].1)
}

/// Whether cell (`col`, `row`) of a packed glyph is lit.
fn glyph_cell(bits: u16, col: i32, row: i32) -> bool {
    bits & (1 << (14 - (row * 3 + col))) != 0
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
