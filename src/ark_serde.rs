use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{self, Serializer};

use std::fmt;
use std::marker::PhantomData;

pub fn canonical_serialize<S, T>(data: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: CanonicalSerialize,
{
    let mut buf: Vec<u8> = Vec::with_capacity(data.serialized_size());
    data.serialize(&mut buf)
        .map_err(|e| ser::Error::custom(format!("{}", e)))?;
    serializer.serialize_bytes(&buf[..])
}

struct CanonicalVisitor<T: CanonicalDeserialize> {
    _t: PhantomData<T>,
}

impl<'de, T: CanonicalDeserialize> Visitor<'de> for CanonicalVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("canonically encoded bytes")
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        T::deserialize(v).map_err(|e| E::custom(format!("{}", e)))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut buf: Vec<u8> = Vec::new();
        while let Some(byte) = seq.next_element()? {
            buf.push(byte);
        }
        T::deserialize(&buf[..]).map_err(|e| de::Error::custom(format!("{}", e)))
    }
}

pub fn canonical_deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: CanonicalDeserialize,
{
    deserializer.deserialize_bytes(CanonicalVisitor::<T> { _t: PhantomData })
}
