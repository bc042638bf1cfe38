use tracing::debug;

/// The slice of a color-adjustment layer's API the bootstrap needs.
pub trait ColorAdjustment {
    fn is_enabled(&self) -> bool;
    fn disable(&mut self);
}

/// Turn the color-adjustment layer off if the page loaded with it active.
/// Runs once, before any event is replayed. Returns whether anything was
/// disabled.
pub fn bootstrap(adjustment: &mut impl ColorAdjustment) -> bool {
    if !adjustment.is_enabled() {
        return false;
    }
    debug!("color-adjustment overrides active, disabling");
    adjustment.disable();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAdjustment {
        enabled: bool,
        disable_calls: usize,
    }

    impl ColorAdjustment for FakeAdjustment {
        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn disable(&mut self) {
            self.enabled = false;
            self.disable_calls += 1;
        }
    }

    #[test]
    fn disables_an_active_layer_once() {
        let mut adjustment = FakeAdjustment {
            enabled: true,
            disable_calls: 0,
        };
        assert!(bootstrap(&mut adjustment));
        assert!(!adjustment.enabled);
        assert_eq!(adjustment.disable_calls, 1);
    }

    #[test]
    fn leaves_an_inactive_layer_untouched() {
        let mut adjustment = FakeAdjustment {
            enabled: false,
            disable_calls: 0,
        };
        assert!(!bootstrap(&mut adjustment));
        assert_eq!(adjustment.disable_calls, 0);
    }

    #[test]
    fn second_bootstrap_is_a_no_op() {
        let mut adjustment = FakeAdjustment {
            enabled: true,
            disable_calls: 0,
        };
        bootstrap(&mut adjustment);
        assert!(!bootstrap(&mut adjustment));
        assert_eq!(adjustment.disable_calls, 1);
    }
}
