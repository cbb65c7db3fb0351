//! Reference tape model: transition-table turmites.
//!
//! A turmite is a two-dimensional Turing machine: it reads the symbol under
//! its head, looks up a `(state, symbol)` rule, writes a symbol, turns,
//! moves one tile forward and switches state. Several machines can share one
//! tape. This module exists so the viewer has something real to drive; the
//! front-end itself only ever sees the [`TapeModel`] trait.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::model::{MachineView, SparseTape, TapeModel, TileCoord, BLANK};

/// Colors handed out to machines in creation order.
const PALETTE: &[[u8; 3]] = &[
    [255, 200, 60],
    [80, 200, 255],
    [255, 90, 90],
    [140, 255, 140],
    [220, 120, 255],
];

/// Head rotation applied after writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
    Around,
    Straight,
}

impl Turn {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "L" => Some(Turn::Left),
            "R" => Some(Turn::Right),
            "U" => Some(Turn::Around),
            "S" => Some(Turn::Straight),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    fn turn(self, turn: Turn) -> Self {
        use Heading::*;
        match turn {
            Turn::Straight => self,
            Turn::Around => match self {
                North => South,
                East => West,
                South => North,
                West => East,
            },
            Turn::Right => match self {
                North => East,
                East => South,
                South => West,
                West => North,
            },
            Turn::Left => match self {
                North => West,
                West => South,
                South => East,
                East => North,
            },
        }
    }

    /// Screen-oriented deltas: y grows downward.
    fn delta(self) -> (i64, i64) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Rule {
    write: char,
    turn: Turn,
    next: u8,
}

/// A turmite transition table.
///
/// Text form, one rule per line, `#` starts a comment:
///
/// ```text
/// # state symbol -> write turn next_state
/// 0 _ -> * R 0
/// 0 * -> _ L 0
/// ```
///
/// `_` stands for the blank symbol; turns are `L`, `R`, `U` (reverse) and
/// `S` (keep heading). A machine with no rule for the `(state, symbol)` it
/// reads halts in place.
#[derive(Clone, Debug)]
pub struct Program {
    name: String,
    rules: HashMap<(u8, char), Rule>,
}

impl Program {
    /// Parse the rule text format
    pub fn parse(name: &str, src: &str) -> Result<Self, ProgramError> {
        let mut rules = HashMap::new();

        for (idx, raw) in src.lines().enumerate() {
            let line = match raw.split_once('#') {
                Some((head, _)) => head,
                None => raw,
            }
            .trim();
            if line.is_empty() {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 6 || tokens[2] != "->" {
                return Err(ProgramError::syntax(
                    idx + 1,
                    "expected `STATE SYMBOL -> WRITE TURN STATE`",
                ));
            }

            let state: u8 = tokens[0]
                .parse()
                .map_err(|_| ProgramError::syntax(idx + 1, "state must be 0-255"))?;
            let symbol = symbol_token(tokens[1])
                .ok_or_else(|| ProgramError::syntax(idx + 1, "symbol must be one character or `_`"))?;
            let write = symbol_token(tokens[3])
                .ok_or_else(|| ProgramError::syntax(idx + 1, "written symbol must be one character or `_`"))?;
            let turn = Turn::from_token(tokens[4])
                .ok_or_else(|| ProgramError::syntax(idx + 1, "turn must be one of L R U S"))?;
            let next: u8 = tokens[5]
                .parse()
                .map_err(|_| ProgramError::syntax(idx + 1, "next state must be 0-255"))?;

            if rules.insert((state, symbol), Rule { write, turn, next }).is_some() {
                return Err(ProgramError::syntax(idx + 1, "duplicate rule"));
            }
        }

        if rules.is_empty() {
            return Err(ProgramError::Empty(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            rules,
        })
    }

    /// Load a program from a rule file; the name is the file stem
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProgramError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("machine")
            .to_string();
        let src = fs::read_to_string(path)?;
        Self::parse(&name, &src)
    }

    /// Langton's ant over `*` cells
    pub fn langton() -> Self {
        let mut rules = HashMap::new();
        rules.insert((0, BLANK), Rule { write: '*', turn: Turn::Right, next: 0 });
        rules.insert((0, '*'), Rule { write: BLANK, turn: Turn::Left, next: 0 });
        Self {
            name: "langton".to_string(),
            rules,
        }
    }

    /// Two-state walker laying a staircase of box-drawing glyphs
    pub fn stairs() -> Self {
        let mut rules = HashMap::new();
        rules.insert((0, BLANK), Rule { write: '─', turn: Turn::Straight, next: 1 });
        rules.insert((1, BLANK), Rule { write: '│', turn: Turn::Left, next: 0 });
        Self {
            name: "stairs".to_string(),
            rules,
        }
    }

    /// Program name, used as the machine label
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn symbol_token(token: &str) -> Option<char> {
    if token == "_" {
        return Some(BLANK);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Errors raised while loading a machine program.
#[derive(Debug)]
pub enum ProgramError {
    Io(std::io::Error),
    Syntax { line: usize, message: String },
    Empty(String),
}

impl ProgramError {
    fn syntax(line: usize, message: &str) -> Self {
        Self::Syntax {
            line,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Syntax { line, message } => write!(f, "line {}: {}", line, message),
            Self::Empty(name) => write!(f, "program '{}' has no rules", name),
        }
    }
}

impl std::error::Error for ProgramError {}

impl From<std::io::Error> for ProgramError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[derive(Clone, Debug)]
struct Machine {
    program: Program,
    pos: TileCoord,
    heading: Heading,
    state: u8,
    color: [u8; 3],
    halted: bool,
}

impl Machine {
    fn step(&mut self, tape: &mut SparseTape) {
        if self.halted {
            return;
        }
        let symbol = tape.read(self.pos);
        let Some(rule) = self.program.rules.get(&(self.state, symbol)).copied() else {
            self.halted = true;
            return;
        };
        tape.write(self.pos, rule.write);
        self.heading = self.heading.turn(rule.turn);
        let (dx, dy) = self.heading.delta();
        self.pos = (self.pos.0 + dx, self.pos.1 + dy);
        self.state = rule.next;
    }
}

/// A set of turmites sharing one sparse tape.
#[derive(Clone, Debug, Default)]
pub struct TurmiteModel {
    tape: SparseTape,
    machines: Vec<Machine>,
}

impl TurmiteModel {
    /// Create a model with an empty tape and no machines
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a machine running `program` with its head at `pos`
    pub fn add_machine(&mut self, program: Program, pos: TileCoord) {
        let color = PALETTE[self.machines.len() % PALETTE.len()];
        self.machines.push(Machine {
            program,
            pos,
            heading: Heading::North,
            state: 0,
            color,
            halted: false,
        });
    }

    /// Pre-write a tape cell, e.g. to seed an initial pattern
    pub fn write_tape(&mut self, coord: TileCoord, symbol: char) {
        self.tape.write(coord, symbol);
    }

    /// The built-in demo: an ant and a staircase walker
    pub fn demo() -> Self {
        let mut model = Self::new();
        model.add_machine(Program::langton(), (0, 0));
        model.add_machine(Program::stairs(), (12, 6));
        model
    }
}

impl TapeModel for TurmiteModel {
    fn step(&mut self) {
        for machine in &mut self.machines {
            machine.step(&mut self.tape);
        }
    }

    fn tape(&self) -> &SparseTape {
        &self.tape
    }

    fn machines(&self) -> Vec<MachineView> {
        self.machines
            .iter()
            .map(|m| MachineView {
                pos: m.pos,
                label: m.program.name.clone(),
                state: if m.halted {
                    "halt".to_string()
                } else {
                    m.state.to_string()
                },
                color: m.color,
            })
            .collect()
    }

    fn clone_model(&self) -> Box<dyn TapeModel> {
        Box::new(self.clone())
    }
}
