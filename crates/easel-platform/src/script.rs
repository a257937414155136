//! Line-oriented input scripts, replayed against a [`Surface`].
//!
//! One step per line; blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! down x y [button]      press (button: primary, secondary, middle or a number)
//! move x y               drag the captured gesture
//! up x y [button]        release
//! wheel x y dx dy        scroll at a point
//! key <key> [code] [mods] key down then up; mods like ctrl+shift
//! type <text>            one key press per character
//! paste <text>           clipboard paste into the focus holder
//! copy | cut             clipboard export; the text is collected in the replay
//! resize w h             new logical size
//! repaint                force a repaint
//! ```

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use easel_core::*;

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Down { at: Point, button: PointerButton },
    Move { at: Point },
    Up { at: Point, button: PointerButton },
    Wheel { at: Point, delta: Point },
    Key { key: Key, code: String, modifiers: Modifiers },
    Type(String),
    Paste(String),
    Copy,
    Cut,
    Resize(Size),
    Repaint,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    /// Steps with their 1-based source line.
    steps: Vec<(usize, Step)>,
}

/// What a replay did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Replay {
    pub steps: usize,
    /// Text exported by `copy` and `cut` steps, in order.
    pub clipboard: Vec<String>,
}

impl Script {
    pub fn parse(src: &str) -> anyhow::Result<Script> {
        let mut steps = Vec::new();
        for (i, raw) in src.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let step = parse_step(line).with_context(|| format!("line {}: `{line}`", i + 1))?;
            steps.push((i + 1, step));
        }
        Ok(Script { steps })
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Script> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Script::parse(&src).with_context(|| format!("in {}", path.display()))
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Feeds every step to `surface` in order.
    pub fn replay<C: Canvas>(&self, surface: &mut Surface<C>) -> anyhow::Result<Replay> {
        if surface.root().is_none() {
            bail!("cannot replay input before a root view is set");
        }
        let mut out = Replay::default();
        for (line, step) in &self.steps {
            log::trace!("replay line {line}: {step:?}");
            if let Some(text) = apply(surface, step) {
                out.clipboard.push(text);
            }
            out.steps += 1;
        }
        log::debug!("replayed {} steps, {} frames drawn", out.steps, surface.frames());
        Ok(out)
    }
}

impl FromStr for Script {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Script::parse(s)
    }
}

fn apply<C: Canvas>(surface: &mut Surface<C>, step: &Step) -> Option<String> {
    let none = Modifiers::empty();
    match step {
        Step::Down { at, button } => {
            surface.pointer_down(*at, *button, none);
        }
        Step::Move { at } => {
            surface.pointer_move(*at, none);
        }
        Step::Up { at, button } => {
            surface.pointer_up(*at, *button, none);
        }
        Step::Wheel { at, delta } => {
            surface.wheel(*at, *delta, none);
        }
        Step::Key {
            key,
            code,
            modifiers,
        } => press_key(surface, key.clone(), code, *modifiers),
        Step::Type(text) => {
            for c in text.chars() {
                let key = Key::Character(c);
                let code = default_code(&key);
                press_key(surface, key, &code, none);
            }
        }
        Step::Paste(text) => {
            surface.clipboard(ClipboardAction::Paste, Some(text.clone()));
        }
        Step::Copy => return surface.clipboard(ClipboardAction::Copy, None),
        Step::Cut => return surface.clipboard(ClipboardAction::Cut, None),
        Step::Resize(size) => {
            surface.set_logical_size(*size);
            surface.repaint();
        }
        Step::Repaint => surface.repaint(),
    }
    None
}

fn press_key<C: Canvas>(surface: &mut Surface<C>, key: Key, code: &str, modifiers: Modifiers) {
    surface.key(KeyEvent::down(key.clone(), code, modifiers));
    surface.key(KeyEvent::up(key, code, modifiers));
}

fn parse_step(line: &str) -> anyhow::Result<Step> {
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();
    let args: Vec<&str> = rest.split_whitespace().collect();
    let step = match verb {
        "down" | "up" => {
            let at = point(&args, 0)?;
            let button = match args.get(2) {
                Some(b) => parse_button(b)?,
                None => PointerButton::Primary,
            };
            expect_at_most(&args, 3)?;
            if verb == "down" {
                Step::Down { at, button }
            } else {
                Step::Up { at, button }
            }
        }
        "move" => {
            expect_at_most(&args, 2)?;
            Step::Move { at: point(&args, 0)? }
        }
        "wheel" => {
            expect_at_most(&args, 4)?;
            Step::Wheel {
                at: point(&args, 0)?,
                delta: point(&args, 2)?,
            }
        }
        "key" => parse_key(&args)?,
        "type" => {
            if rest.is_empty() {
                bail!("`type` needs text");
            }
            Step::Type(rest.to_string())
        }
        "paste" => Step::Paste(rest.to_string()),
        "copy" => Step::Copy,
        "cut" => Step::Cut,
        "resize" => {
            expect_at_most(&args, 2)?;
            let p = point(&args, 0)?;
            if p.x < 0.0 || p.y < 0.0 {
                bail!("size must not be negative");
            }
            Step::Resize(Size::new(p.x, p.y))
        }
        "repaint" => Step::Repaint,
        other => bail!("unknown step `{other}`"),
    };
    Ok(step)
}

fn parse_key(args: &[&str]) -> anyhow::Result<Step> {
    let name = args.first().ok_or_else(|| anyhow!("`key` needs a key name"))?;
    let key = Key::from_name(name);
    if let Key::Unidentified(name) = &key {
        bail!("unknown key `{name}`");
    }
    expect_at_most(args, 3)?;
    let (code, modifiers) = match args[1..] {
        [] => (default_code(&key), Modifiers::empty()),
        [one] => match parse_modifiers(one) {
            Ok(mods) => (default_code(&key), mods),
            Err(_) => (one.to_string(), Modifiers::empty()),
        },
        [code, mods, ..] => (code.to_string(), parse_modifiers(mods)?),
    };
    Ok(Step::Key {
        key,
        code,
        modifiers,
    })
}

fn expect_at_most(args: &[&str], n: usize) -> anyhow::Result<()> {
    if args.len() > n {
        bail!("expected at most {n} arguments, got {}", args.len());
    }
    Ok(())
}

fn number(args: &[&str], i: usize) -> anyhow::Result<f32> {
    let raw = args.get(i).ok_or_else(|| anyhow!("missing argument {}", i + 1))?;
    raw.parse::<f32>()
        .with_context(|| format!("argument {} is not a number: `{raw}`", i + 1))
}

fn point(args: &[&str], i: usize) -> anyhow::Result<Point> {
    Ok(Point::new(number(args, i)?, number(args, i + 1)?))
}

fn parse_button(s: &str) -> anyhow::Result<PointerButton> {
    Ok(match s {
        "primary" | "left" => PointerButton::Primary,
        "secondary" | "right" => PointerButton::Secondary,
        "middle" | "tertiary" => PointerButton::Tertiary,
        n => PointerButton::Other(
            n.parse()
                .map_err(|_| anyhow!("unknown pointer button `{n}`"))?,
        ),
    })
}

/// Parses `ctrl+shift`-style modifier lists.
pub fn parse_modifiers(s: &str) -> anyhow::Result<Modifiers> {
    let mut mods = Modifiers::empty();
    for part in s.split('+') {
        mods |= match part.to_ascii_lowercase().as_str() {
            "shift" => Modifiers::SHIFT,
            "ctrl" | "control" => Modifiers::CTRL,
            "alt" | "option" => Modifiers::ALT,
            "meta" | "cmd" | "super" => Modifiers::META,
            _ => bail!("unknown modifier `{part}`"),
        };
    }
    Ok(mods)
}

/// Physical key code a US layout would report for `key`.
pub fn default_code(key: &Key) -> String {
    match key {
        Key::Character(' ') => "Space".into(),
        Key::Character(c) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        Key::Character(c) if c.is_ascii_digit() => format!("Digit{c}"),
        Key::Character(_) => String::new(),
        Key::F(n) => format!("F{n}"),
        Key::Unidentified(name) => name.clone(),
        named => format!("{named:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let script = Script::parse(
            "# comment\n\
             down 10 20\n\
             move 15 25\n\
             up 15 25 right\n\
             wheel 1 2 0 -40\n\
             key Enter\n\
             key d KeyD ctrl\n\
             type hi there\n\
             paste a b\n\
             copy\n\
             \n\
             resize 800 600\n\
             repaint\n",
        )
        .unwrap();
        let steps: Vec<&Step> = script.steps().collect();
        assert_eq!(steps.len(), 11);
        assert_eq!(
            steps[2],
            &Step::Up {
                at: Point::new(15.0, 25.0),
                button: PointerButton::Secondary
            }
        );
        assert_eq!(
            steps[5],
            &Step::Key {
                key: Key::Character('d'),
                code: "KeyD".into(),
                modifiers: Modifiers::CTRL
            }
        );
        assert_eq!(steps[6], &Step::Type("hi there".into()));
        assert_eq!(steps[9], &Step::Resize(Size::new(800.0, 600.0)));
    }

    #[test]
    fn key_accepts_modifiers_without_a_code() {
        let script = Script::parse("key a ctrl+shift").unwrap();
        assert_eq!(
            script.steps().next(),
            Some(&Step::Key {
                key: Key::Character('a'),
                code: "KeyA".into(),
                modifiers: Modifiers::CTRL | Modifiers::SHIFT
            })
        );
    }

    #[test]
    fn errors_name_the_line() {
        let err = Script::parse("down 1 2\n\nmove 3 nope").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.starts_with("line 3: `move 3 nope`"), "{msg}");
        assert!(msg.contains("not a number"), "{msg}");

        let err = Script::parse("jump 1 2").unwrap_err();
        assert!(format!("{err:#}").contains("unknown step `jump`"));

        assert!(Script::parse("key Hyper").is_err());
        assert!(Script::parse("down 1 2 thumb").is_err());
        assert!(Script::parse("move 1 2 3").is_err());
    }

    #[test]
    fn default_codes() {
        assert_eq!(default_code(&Key::Character('q')), "KeyQ");
        assert_eq!(default_code(&Key::Character('7')), "Digit7");
        assert_eq!(default_code(&Key::Character(' ')), "Space");
        assert_eq!(default_code(&Key::ArrowLeft), "ArrowLeft");
        assert_eq!(default_code(&Key::F(5)), "F5");
    }
}
