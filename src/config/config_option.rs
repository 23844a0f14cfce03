/// A configuration value, together with a name and the range of values permitted.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: PartialOrd> ConfigOption<T> {
    /// Sets the value of the option to `value` if within the permitted range.
    /// Returns true if the value was set, false otherwise.
    pub fn set(&mut self, value: T) -> bool {
        if self.min <= value && value <= self.max {
            self.value = value;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_within_range() {
        let mut option = ConfigOption {
            name: "fraction",
            min: 0.0,
            max: 1.0,
            value: 0.5,
        };

        assert!(option.set(1.0));
        assert!(!option.set(1.5));
        assert_eq!(option.value, 1.0);
    }
}
