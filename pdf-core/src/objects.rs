use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Object identifier: (object_number, generation_number).
/// Generation is always 0 for new documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32, pub u16);

/// Represents PDF object types per PDF 32000-1:2008 Section 7.3.
#[derive(Debug, Clone)]
pub enum PdfObject {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// PDF name object (stored without the leading `/`).
    Name(String),
    /// PDF literal string (stored without the enclosing parens).
    LiteralString(String),
    Array(Vec<PdfObject>),
    /// Key-value pairs. Uses Vec for deterministic output order.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    pub fn literal_string(s: &str) -> Self {
        PdfObject::LiteralString(s.to_string())
    }

    pub fn array(items: Vec<PdfObject>) -> Self {
        PdfObject::Array(items)
    }

    /// Array of reals, e.g. a `MediaBox` or a `FontBBox`.
    pub fn reals(values: &[f64]) -> Self {
        PdfObject::Array(values.iter().map(|v| PdfObject::Real(*v)).collect())
    }

    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(owned_entries(entries))
    }

    pub fn stream(dict_entries: Vec<(&str, PdfObject)>, data: Vec<u8>) -> Self {
        PdfObject::Stream {
            dict: owned_entries(dict_entries),
            data,
        }
    }

    /// Build a stream, deflating `data` and adding `/Filter /FlateDecode`
    /// when `compress` is set. Extra entries such as `/Length1` must be
    /// supplied by the caller with the uncompressed length.
    pub fn stream_with(
        mut dict_entries: Vec<(&str, PdfObject)>,
        data: Vec<u8>,
        compress: bool,
    ) -> io::Result<Self> {
        if !compress {
            return Ok(Self::stream(dict_entries, data));
        }
        let deflated = deflate(&data)?;
        dict_entries.push(("Filter", PdfObject::name("FlateDecode")));
        Ok(Self::stream(dict_entries, deflated))
    }
}

impl From<ObjId> for PdfObject {
    fn from(id: ObjId) -> Self {
        PdfObject::Reference(id)
    }
}

impl From<i64> for PdfObject {
    fn from(n: i64) -> Self {
        PdfObject::Integer(n)
    }
}

impl From<f64> for PdfObject {
    fn from(f: f64) -> Self {
        PdfObject::Real(f)
    }
}

fn owned_entries(entries: Vec<(&str, PdfObject)>) -> Vec<(String, PdfObject)> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Zlib-deflate a byte buffer for a `/FlateDecode` stream.
pub(crate) fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Sequential allocator for indirect object numbers.
#[derive(Debug)]
pub(crate) struct ObjAllocator {
    next: u32,
}

impl ObjAllocator {
    pub(crate) fn starting_at(first: u32) -> Self {
        ObjAllocator { next: first }
    }

    pub(crate) fn next_id(&mut self) -> ObjId {
        let id = ObjId(self.next, 0);
        self.next += 1;
        id
    }
}
