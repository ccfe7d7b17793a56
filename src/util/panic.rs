/// Asserts that evaluating the provided block panics.
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "expected a panic, but the block returned normally")
    };
    ($run:block, $msg:literal) => {
        assert!(
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(),
            $msg
        );
    };
}

pub(crate) use assert_panics;
