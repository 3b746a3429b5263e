//! Builtin functions.
//!
//! Every builtin is a plain function pointer over the interpreter's [`Io`]
//! and the evaluated arguments. They validate their own arguments and fail
//! with [`RuntimeError::Native`] instead of panicking.

use crate::error::{RuntimeError, RuntimeResult};
use crate::io::Io;
use crate::value::Value;
use std::fmt;

/// Signature shared by all builtins.
pub type NativeFn = fn(&mut Io, &[Value]) -> RuntimeResult<Value>;

/// A named builtin.
pub struct NativeFunction {
    /// Name the builtin is bound to in the global environment
    pub name: &'static str,
    /// Implementation
    pub func: NativeFn,
}

impl NativeFunction {
    /// Calls the builtin.
    pub fn call(&self, io: &mut Io, args: &[Value]) -> RuntimeResult<Value> {
        (self.func)(io, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Every builtin, in registration order.
pub static NATIVES: [NativeFunction; 8] = [
    NativeFunction { name: "print", func: print },
    NativeFunction { name: "toString", func: to_string },
    NativeFunction { name: "toInt", func: to_int },
    NativeFunction { name: "toFloat", func: to_float },
    NativeFunction { name: "length", func: length },
    NativeFunction { name: "substring", func: substring },
    NativeFunction { name: "concat", func: concat },
    NativeFunction { name: "input", func: input },
];

/// Finds a builtin by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static NativeFunction> {
    NATIVES.iter().find(|native| native.name == name)
}

fn native_error(message: impl Into<String>) -> RuntimeError {
    RuntimeError::Native(message.into())
}

fn expect_args(name: &str, args: &[Value], expected: usize) -> RuntimeResult<()> {
    if args.len() == expected {
        return Ok(());
    }
    let plural = if expected == 1 { "" } else { "s" };
    Err(native_error(format!(
        "{name} expects {expected} argument{plural} but got {}",
        args.len()
    )))
}

fn join(args: &[Value], separator: &str) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

fn print(io: &mut Io, args: &[Value]) -> RuntimeResult<Value> {
    io.write_line(&join(args, " "))?;
    Ok(Value::Null)
}

fn to_string(_: &mut Io, args: &[Value]) -> RuntimeResult<Value> {
    expect_args("toString", args, 1)?;
    Ok(Value::String(args[0].to_string()))
}

fn to_int(_: &mut Io, args: &[Value]) -> RuntimeResult<Value> {
    expect_args("toInt", args, 1)?;
    let n = match &args[0] {
        Value::Integer(n) => *n,
        // truncates toward zero, saturating at the bounds
        Value::Float(x) => *x as i64,
        Value::Boolean(b) => i64::from(*b),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| native_error(format!("cannot convert '{s}' to int")))?,
        other => {
            return Err(native_error(format!(
                "cannot convert {} to int",
                other.type_name()
            )));
        }
    };
    Ok(Value::Integer(n))
}

fn to_float(_: &mut Io, args: &[Value]) -> RuntimeResult<Value> {
    expect_args("toFloat", args, 1)?;
    let x = match &args[0] {
        Value::Integer(n) => *n as f64,
        Value::Float(x) => *x,
        Value::Boolean(b) => f64::from(u8::from(*b)),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| native_error(format!("cannot convert '{s}' to float")))?,
        other => {
            return Err(native_error(format!(
                "cannot convert {} to float",
                other.type_name()
            )));
        }
    };
    Ok(Value::Float(x))
}

fn length(_: &mut Io, args: &[Value]) -> RuntimeResult<Value> {
    expect_args("length", args, 1)?;
    match &args[0] {
        Value::String(s) => Ok(Value::Integer(s.chars().count() as i64)),
        _ => Err(native_error("length expects a string argument")),
    }
}

fn substring(_: &mut Io, args: &[Value]) -> RuntimeResult<Value> {
    expect_args("substring", args, 3)?;
    let (Value::String(s), Value::Integer(start), Value::Integer(len)) =
        (&args[0], &args[1], &args[2])
    else {
        return Err(native_error("substring expects (string, int, int) arguments"));
    };

    let count = s.chars().count();
    let start = usize::try_from(*start)
        .ok()
        .filter(|start| *start <= count)
        .ok_or_else(|| native_error(format!("substring start {start} is out of bounds")))?;
    // negative or overlong lengths take the rest of the string
    let take = usize::try_from(*len)
        .ok()
        .map_or(count - start, |len| len.min(count - start));

    Ok(Value::String(s.chars().skip(start).take(take).collect()))
}

fn concat(_: &mut Io, args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::String(join(args, "")))
}

fn input(io: &mut Io, args: &[Value]) -> RuntimeResult<Value> {
    match args {
        [] => {}
        [Value::String(prompt)] => {
            io.write_str(prompt)?;
            io.flush()?;
        }
        [_] => return Err(native_error("input expects a string prompt")),
        _ => {
            return Err(native_error(format!(
                "input expects 0 to 1 arguments but got {}",
                args.len()
            )));
        }
    }
    Ok(Value::String(io.read_line()?.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::SharedOutput;
    use std::io::Cursor;

    fn call(name: &str, args: &[Value]) -> RuntimeResult<Value> {
        let mut io = Io::new(Box::new(std::io::sink()), Box::new(std::io::empty()));
        lookup(name).unwrap().call(&mut io, args)
    }

    fn message(result: RuntimeResult<Value>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_lookup() {
        assert!(lookup("print").is_some());
        assert!(lookup("substring").is_some());
        assert!(lookup("printf").is_none());
        assert_eq!(NATIVES.len(), 8);
    }

    #[test]
    fn test_print_joins_with_spaces() {
        let output = SharedOutput::new();
        let mut io = Io::new(Box::new(output.clone()), Box::new(std::io::empty()));
        let args = [Value::from("x ="), Value::Integer(3), Value::Float(1.0), Value::Null];
        assert_eq!(print(&mut io, &args), Ok(Value::Null));
        assert_eq!(print(&mut io, &[]), Ok(Value::Null));
        assert_eq!(output.contents(), "x = 3 1.0 null\n\n");
    }

    #[test]
    fn test_to_string() {
        assert_eq!(call("toString", &[Value::Float(2.0)]), Ok(Value::from("2.0")));
        assert_eq!(
            message(call("toString", &[])),
            "toString expects 1 argument but got 0"
        );
    }

    #[test]
    fn test_to_int() {
        assert_eq!(call("toInt", &[Value::from(" 42 ")]), Ok(Value::Integer(42)));
        assert_eq!(call("toInt", &[Value::Float(-3.9)]), Ok(Value::Integer(-3)));
        assert_eq!(call("toInt", &[Value::Boolean(true)]), Ok(Value::Integer(1)));
        assert_eq!(message(call("toInt", &[Value::from("4x")])), "cannot convert '4x' to int");
        assert_eq!(message(call("toInt", &[Value::Null])), "cannot convert null to int");
        assert_eq!(
            message(call("toInt", &[Value::Integer(1), Value::Integer(2)])),
            "toInt expects 1 argument but got 2"
        );
    }

    #[test]
    fn test_to_float() {
        assert_eq!(call("toFloat", &[Value::Integer(2)]), Ok(Value::Float(2.0)));
        assert_eq!(call("toFloat", &[Value::from("0.25")]), Ok(Value::Float(0.25)));
        assert_eq!(call("toFloat", &[Value::Boolean(false)]), Ok(Value::Float(0.0)));
        assert_eq!(
            message(call("toFloat", &[Value::from("pi")])),
            "cannot convert 'pi' to float"
        );
    }

    #[test]
    fn test_length_counts_chars() {
        assert_eq!(call("length", &[Value::from("héllo")]), Ok(Value::Integer(5)));
        assert_eq!(
            message(call("length", &[Value::Integer(5)])),
            "length expects a string argument"
        );
    }

    #[test]
    fn test_substring() {
        let s = || Value::from("hello");
        let sub = |start, len| call("substring", &[s(), Value::Integer(start), Value::Integer(len)]);

        assert_eq!(sub(1, 3), Ok(Value::from("ell")));
        assert_eq!(sub(2, 100), Ok(Value::from("llo")));
        assert_eq!(sub(2, -1), Ok(Value::from("llo")));
        assert_eq!(sub(5, 2), Ok(Value::from("")));
        assert_eq!(message(sub(6, 1)), "substring start 6 is out of bounds");
        assert_eq!(message(sub(-1, 1)), "substring start -1 is out of bounds");
        assert_eq!(
            message(call("substring", &[s(), Value::from("1"), Value::Integer(1)])),
            "substring expects (string, int, int) arguments"
        );
    }

    #[test]
    fn test_concat() {
        let args = [Value::from("a"), Value::Integer(1), Value::Boolean(false)];
        assert_eq!(call("concat", &args), Ok(Value::from("a1false")));
        assert_eq!(call("concat", &[]), Ok(Value::from("")));
    }

    #[test]
    fn test_input_reads_line_after_prompt() {
        let output = SharedOutput::new();
        let mut io = Io::new(Box::new(output.clone()), Box::new(Cursor::new("Ada\n")));
        assert_eq!(input(&mut io, &[Value::from("name? ")]), Ok(Value::from("Ada")));
        assert_eq!(input(&mut io, &[]), Ok(Value::from("")));
        assert_eq!(output.contents(), "name? ");
    }
}
