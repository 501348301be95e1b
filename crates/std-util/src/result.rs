/// Unwraps an `Err`, panicking with the `Ok` value otherwise.
///
/// An optional trailing format string is appended to the panic message.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(e) => e,
            actual => {
                #[allow(unused_mut)]
                let mut msg = format!("expected `{}` to fail; actual={:?}", stringify!($e), actual);
                $(
                    msg.push_str(", ");
                    msg.push_str(&format!($($t)*));
                )?
                panic!("{}", msg);
            }
        }
    };
}

/// Unwraps an `Ok`, panicking with the error otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => panic!("expected `{}` to succeed; error={}", stringify!($e), e),
        }
    };
}

/// Asserts that generated text contains a fragment, printing the whole
/// text on failure.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {{
        let haystack: &str = &$haystack;
        let needle: &str = &$needle;
        if !haystack.contains(needle) {
            panic!(
                "expected text to contain\n---\n{}\n---\nactual:\n{}",
                needle, haystack
            );
        }
    }};
}

#[macro_export]
macro_rules! assert_not_contains {
    ($haystack:expr, $needle:expr) => {{
        let haystack: &str = &$haystack;
        let needle: &str = &$needle;
        if haystack.contains(needle) {
            panic!(
                "expected text not to contain\n---\n{}\n---\nactual:\n{}",
                needle, haystack
            );
        }
    }};
}
