use derive_more::Display;

/// Coordinate axis a kd-tree node splits on.
///
/// The splitting plane of a node tagged `Axis::X` is perpendicular to the x axis.
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Axis {
    #[default]
    #[display("x")]
    X = 0,
    #[display("y")]
    Y = 1,
    #[display("z")]
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::Axis;

    #[test]
    fn default_and_display_test() {
        assert_eq!(Axis::default(), Axis::X);
        assert_eq!(
            Axis::ALL.map(|a| a.to_string()),
            ["x".to_owned(), "y".to_owned(), "z".to_owned()]
        );
        assert_eq!(Axis::ALL.map(Axis::index), [0, 1, 2]);
    }
}
