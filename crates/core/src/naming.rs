//! Scope naming.
//!
//! A scope is named one of three ways:
//!
//! - no argument: the unqualified name of the calling function ([`here!`])
//! - one argument: used verbatim
//! - a format string plus arguments: interpolated with `format!`
//!
//! [`enter!`], [`scope!`] and [`message!`] apply these rules on top of the
//! plain [`Tracer`](crate::Tracer) methods.

/// Strip a path down to its last `::` segment.
///
/// ```
/// assert_eq!(calltrace_core::naming::unqualified("a::b::c"), "c");
/// assert_eq!(calltrace_core::naming::unqualified("c"), "c");
/// ```
pub fn unqualified(path: &str) -> &str {
    match path.rfind("::") {
        Some(at) => &path[at + 2..],
        None => path,
    }
}

/// Reduce the type name of a marker fn declared inside a function to that
/// function's unqualified name. Used by [`here!`].
#[doc(hidden)]
pub fn function_name(marker: &'static str) -> &'static str {
    let mut path = marker.strip_suffix("::__here").unwrap_or(marker);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    unqualified(path)
}

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

/// Unqualified name of the enclosing function.
///
/// Closures report the function they are defined in.
///
/// ```
/// fn load_config() -> &'static str {
///     calltrace_core::here!()
/// }
/// assert_eq!(load_config(), "load_config");
/// ```
#[macro_export]
macro_rules! here {
    () => {{
        fn __here() {}
        $crate::naming::function_name($crate::naming::type_name_of(__here))
    }};
}

/// Enter a scope, naming it by the naming rule. Returns the
/// [`ExitToken`](crate::ExitToken).
///
/// ```
/// use calltrace_core::{enter, Tracer};
///
/// let mut tracer = Tracer::new();
/// let token = enter!(tracer, "step {}", 1);
/// tracer.exit(token);
/// ```
#[macro_export]
macro_rules! enter {
    ($tracer:expr) => {
        $tracer.enter($crate::here!())
    };
    ($tracer:expr, $name:expr) => {
        $tracer.enter($name)
    };
    ($tracer:expr, $fmt:expr, $($arg:tt)+) => {
        $tracer.enter(::std::format!($fmt, $($arg)+))
    };
}

/// Open a [`Scope`](crate::Scope) guard, naming it by the naming rule.
#[macro_export]
macro_rules! scope {
    ($tracer:expr) => {
        $tracer.scope($crate::here!())
    };
    ($tracer:expr, $name:expr) => {
        $tracer.scope($name)
    };
    ($tracer:expr, $fmt:expr, $($arg:tt)+) => {
        $tracer.scope(::std::format!($fmt, $($arg)+))
    };
}

/// Record a message built from any number of displayable parts.
///
/// No parts records the placeholder message; several parts are joined with
/// a space. The space goes between every pair of parts, including two
/// adjacent strings or a string next to a number.
///
/// ```
/// use calltrace_core::{message, Tracer};
///
/// let mut tracer = Tracer::new();
/// message!(tracer, "retries", 3);
/// tracer.finalize();
/// assert_eq!(tracer.messages().unwrap()[0].text(), "retries 3");
/// ```
#[macro_export]
macro_rules! message {
    ($tracer:expr) => {
        $tracer.message_parts(&[])
    };
    ($tracer:expr, $($part:expr),+ $(,)?) => {
        $tracer.message_parts(&[$(&$part as &dyn ::std::fmt::Display),+])
    };
}
