//!
//! Serde-related.
//!

pub use serde::{de, Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{Secret, Strategy};

/// Marker trait for secret types which can be [`Serialize`]-d by [`serde`].
///
/// Types marked with this trait receive a [`Serialize`] impl for
/// `Secret<T>`, all types which impl `DeserializeOwned` receive a
/// [`Deserialize`] impl. This asymmetry is deliberate: serializing a
/// secret must be an explicit opt-in, never an accident.
pub trait SerializableSecret: Serialize {}

impl SerializableSecret for String {}
impl SerializableSecret for Value {}
impl SerializableSecret for u8 {}
impl SerializableSecret for u16 {}

impl<'de, T, I> Deserialize<'de> for Secret<T, I>
where
    T: Clone + de::DeserializeOwned + Sized,
    I: Strategy<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::new)
    }
}

impl<T, I> Serialize for Secret<T, I>
where
    T: SerializableSecret + Sized,
    I: Strategy<T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use crate::PeekInterface;

        self.peek().serialize(serializer)
    }
}
