//! Unit wrappers marking the coordinate system of a value.

macro_rules! unit_wrapper {
    ($(#[$meta:meta])* pub $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name<T>(pub T);

        impl<T> From<T> for $name<T> {
            fn from(value: T) -> Self {
                Self(value)
            }
        }

        impl<T> std::ops::Deref for $name<T> {
            type Target = T;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<T> std::ops::DerefMut for $name<T> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }
    };
}

unit_wrapper!(
    /// Values measured in pixels.
    pub Pixel
);

unit_wrapper!(
    /// Values normalized by the image dimensions.
    pub Ratio
);
