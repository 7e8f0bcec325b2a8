//! Generated element model
//!
//! A minimal description of the Java and XML elements the generators
//! produce. Nothing here knows about tables or columns; the generators fill
//! these structures and the `render` module turns them into text.

pub mod java;
pub mod xml;

pub use java::{
    Field, InnerClass, Interface, JavaType, Method, Parameter, TopLevelClass, Visibility,
};
pub use xml::{XmlDocument, XmlElement, XmlNode};
