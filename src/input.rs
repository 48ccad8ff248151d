/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::CallOrigin;

/***************************************/
/*       Public data structures        */
/***************************************/

// Button A raises an onboard request, button B a hall request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
}

impl Button {
    pub fn origin(&self) -> CallOrigin {
        match *self {
            Button::A => CallOrigin::Internal,
            Button::B => CallOrigin::External,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Button),
    Manual(CallOrigin, u8),
    Quit,
}

/// Fires once on the transition into "pressed", not while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeTrigger {
    last: bool,
}

impl EdgeTrigger {
    pub fn rising(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.last;
        self.last = pressed;
        fired
    }
}

/// Samples both buttons once per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonPanel {
    a: EdgeTrigger,
    b: EdgeTrigger,
}

impl ButtonPanel {
    pub fn new() -> ButtonPanel {
        ButtonPanel::default()
    }

    // Buttons whose press started this cycle, A before B
    pub fn sample(&mut self, a_pressed: bool, b_pressed: bool) -> Vec<Button> {
        let mut fired = Vec::new();
        if self.a.rising(a_pressed) {
            fired.push(Button::A);
        }
        if self.b.rising(b_pressed) {
            fired.push(Button::B);
        }
        fired
    }

    // Records both buttons as up, so the next press fires again
    pub fn release(&mut self) {
        self.a.rising(false);
        self.b.rising(false);
    }
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Parses one console command.
 *
 * - `a` / `b`:         press button A / B
 * - `i <floor>`:       onboard request for a floor
 * - `e <floor>`:       hall request at a floor
 * - `q`:               quit
 */
pub fn parse_command(line: &str) -> Option<InputEvent> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_ascii_lowercase();

    let event = match command.as_str() {
        "a" => InputEvent::Press(Button::A),
        "b" => InputEvent::Press(Button::B),
        "q" | "quit" => InputEvent::Quit,
        "i" | "e" => {
            let floor = words.next()?.parse::<u8>().ok()?;
            let origin = if command == "i" {
                CallOrigin::Internal
            } else {
                CallOrigin::External
            };
            InputEvent::Manual(origin, floor)
        }
        _ => return None,
    };

    if words.next().is_some() {
        return None;
    }
    Some(event)
}
