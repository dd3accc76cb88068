/// A countdown register. Ticks once per cycle and rests at zero; it never
/// reloads on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    pub count: u8,
}

impl Timer {
    pub fn new(init_count: u8) -> Self {
        Self { count: init_count }
    }

    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    pub fn get(&self) -> u8 {
        self.count
    }

    pub fn is_active(&self) -> bool {
        self.count != 0
    }

    pub fn tick(&mut self) {
        self.count = self.count.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_down_to_zero_and_rests() {
        let mut t = Timer::new(2);
        t.tick();
        assert_eq!(t.get(), 1);
        assert!(t.is_active());
        t.tick();
        t.tick();
        assert_eq!(t.get(), 0);
        assert!(!t.is_active());
    }
}
