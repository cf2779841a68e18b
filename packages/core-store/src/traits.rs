//! Accessor traits: Reader, Writer.
//!
//! Code that should only see a store through its permission checks takes
//! `&dyn Reader` or `&mut dyn Accessor` instead of a concrete [`Store`].

use crate::{Error, Object, Path, Store, Value};

/// Read values from paths.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Reader>`.
pub trait Reader {
    /// Read the value at a path, subject to the store's permissions.
    fn read(&self, from: &Path) -> Result<Value, Error>;

    /// Dump every readable property into a plain object.
    fn entries(&self) -> Object;
}

/// Write values to paths.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Writer>`.
pub trait Writer {
    /// Write a value at a path, subject to the store's permissions.
    ///
    /// Returns the value as it was given, before any normalization.
    fn write(&mut self, to: &Path, value: Value) -> Result<Value, Error>;
}

/// Combined read/write access.
pub trait Accessor: Reader + Writer {}
impl<T: Reader + Writer> Accessor for T {}

impl Reader for Store {
    fn read(&self, from: &Path) -> Result<Value, Error> {
        self.read_path(from)
    }

    fn entries(&self) -> Object {
        Store::entries(self)
    }
}

impl Writer for Store {
    fn write(&mut self, to: &Path, value: Value) -> Result<Value, Error> {
        self.write_path(to, value)
    }
}

// Blanket implementations for references and boxes. There is no
// `Reader for &mut T`: it would shadow `Store::read(&str)` on `&mut Store`.

impl<T: Reader + ?Sized> Reader for &T {
    fn read(&self, from: &Path) -> Result<Value, Error> {
        (**self).read(from)
    }

    fn entries(&self) -> Object {
        (**self).entries()
    }
}

impl<T: Writer + ?Sized> Writer for &mut T {
    fn write(&mut self, to: &Path, value: Value) -> Result<Value, Error> {
        (**self).write(to, value)
    }
}

impl<T: Reader + ?Sized> Reader for Box<T> {
    fn read(&self, from: &Path) -> Result<Value, Error> {
        self.as_ref().read(from)
    }

    fn entries(&self) -> Object {
        self.as_ref().entries()
    }
}

impl<T: Writer + ?Sized> Writer for Box<T> {
    fn write(&mut self, to: &Path, value: Value) -> Result<Value, Error> {
        self.as_mut().write(to, value)
    }
}
