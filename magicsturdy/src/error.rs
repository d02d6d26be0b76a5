/// Errors of the key processor and the config storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A key event referenced a position outside the matrix
    InvalidPosition { row: u8, col: u8 },
    /// Config record couldn't be serialized or deserialized
    Storage,
}

impl From<postcard::Error> for Error {
    fn from(_: postcard::Error) -> Self {
        Error::Storage
    }
}
