//! The value dumper: renders one value graph as a Go literal.

use std::fmt::{self, Write};

use kew_value::{Data, Field, Kind, Pointer, Receiver, Type, Value};

use crate::{
    Config, Dependencies, TypeNamer, bytes,
    cycle::{Entry, PointerChain},
    is_zero, literal,
    sort::sort_entries,
};

const INVALID: &str = "nil /* invalid */";
const MAX_DEPTH: &str = "/* max depth reached */";
const CIRCULAR: &str = "/* circular reference */";

/// Per-call flags for the slot a value is written into.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Slot {
    /// The value follows inline after `key: `.
    pub(crate) skip_indent: bool,
    /// The type was already written by the pointer path.
    pub(crate) skip_type: bool,
    /// The value was unpacked from an interface, so untyped literals need
    /// a conversion to keep their dynamic type.
    pub(crate) boxed: bool,
    /// The value can have its address taken, enabling pointer-receiver methods.
    pub(crate) addressable: bool,
}

impl Slot {
    fn inline(self) -> Self {
        Self {
            skip_indent: true,
            ..self
        }
    }
}

/// Where the pointer chain of a pointer value ends.
enum ChainEnd {
    Nil,
    Cycle { indirects: usize, pointer: Pointer },
    Pointee { indirects: usize, pointer: Pointer },
}

/// Renders values into a sink, tracking depth, the active pointer chain and
/// the packages the output depends on.
pub(crate) struct Dumper<'a, W> {
    out: W,
    config: &'a Config,
    depth: usize,
    pointers: PointerChain,
    deps: Dependencies,
}

impl<'a, W: Write> Dumper<'a, W> {
    pub(crate) fn new(config: &'a Config, out: W) -> Self {
        Self {
            out,
            config,
            depth: 0,
            pointers: PointerChain::new(),
            deps: Dependencies::new(),
        }
    }

    /// Consume the dumper, returning the packages the output refers to.
    pub(crate) fn into_dependencies(self) -> Dependencies {
        self.deps
    }

    /// Write `value` as a package-level `var _` declaration.
    ///
    /// Returns false, writing nothing, for invalid values and nil
    /// interfaces: they have no type to declare.
    pub(crate) fn dump_top(&mut self, value: &Value) -> Result<bool, fmt::Error> {
        let value = value.unpack();
        match value.data() {
            Data::Invalid | Data::Interface(None) => return Ok(false),
            Data::Ptr(None) | Data::Slice(None) | Data::Map(None) | Data::Address(0) => {
                let name = self.type_name(value.ty());
                writeln!(self.out, "var _ {} = nil", name)?;
                return Ok(true);
            }
            _ => {}
        }
        self.out.write_str("var _ = ")?;
        let slot = Slot {
            boxed: true,
            ..Slot::default()
        };
        self.dump(value, slot)?;
        self.out.write_char('\n')?;
        Ok(true)
    }

    pub(crate) fn dump(&mut self, value: &Value, slot: Slot) -> fmt::Result {
        match value.data() {
            Data::Invalid => {
                self.indent(slot)?;
                return self.out.write_str(INVALID);
            }
            Data::Ptr(_) => {
                self.indent(slot)?;
                return self.dump_ptr(value, slot);
            }
            Data::Interface(Some(inner)) => {
                let slot = Slot {
                    boxed: true,
                    addressable: false,
                    ..slot
                };
                return self.dump(inner, slot);
            }
            Data::Interface(None) => {
                self.indent(slot)?;
                return self.out.write_str("nil");
            }
            _ => {}
        }

        if !slot.skip_type
            && let Some(text) = self.override_text(value, slot.addressable)
        {
            self.indent(slot)?;
            return self.out.write_str(&text);
        }
        if !slot.skip_type {
            self.indent(slot)?;
        }

        match value.data() {
            Data::Slice(None) | Data::Map(None) => self.write_nil(value.ty(), slot),
            Data::Slice(Some(items)) | Data::Array(items) => self.dump_sequence(value, items, slot),
            Data::Map(Some(entries)) => self.dump_map(value.ty(), entries, slot),
            Data::Struct(fields) => self.dump_struct(value.ty(), fields, slot),
            Data::Address(addr) => self.out.write_str(&literal::hex(*addr as u64)),
            Data::Opaque(text) => self.out.write_str(text),
            _ => self.dump_scalar(value, slot),
        }
    }

    fn dump_scalar(&mut self, value: &Value, slot: Slot) -> fmt::Result {
        let ty = value.ty();
        let text = match value.data() {
            Data::Bool(b) => b.to_string(),
            Data::Int(i) => i.to_string(),
            Data::Uint(u) if ty.kind() == Kind::Uintptr => format!("{:#x}", u),
            Data::Uint(u) => u.to_string(),
            Data::Float(f) => literal::float(*f, ty.kind().bits(), &mut self.deps),
            Data::Complex(re, im) => {
                let bits = if ty.kind() == Kind::Complex64 { 32 } else { 64 };
                literal::complex(*re, *im, bits, &mut self.deps)
            }
            Data::String(s) => literal::string(s),
            other => format!("{:?}", other),
        };
        if slot.boxed && !slot.skip_type && !literal::has_default_type(ty, &text) {
            let name = self.type_name(ty);
            return write!(self.out, "{}({})", name, text);
        }
        self.out.write_str(&text)
    }

    fn write_nil(&mut self, ty: &Type, slot: Slot) -> fmt::Result {
        if slot.boxed && !slot.skip_type {
            let name = self.type_name(ty);
            return write!(self.out, "{}(nil)", name);
        }
        self.out.write_str("nil")
    }

    fn dump_sequence(&mut self, value: &Value, items: &[Value], slot: Slot) -> fmt::Result {
        let ty = value.ty();
        let elem = ty.elem().cloned().unwrap_or_else(|| Type::interface().into());

        if let Some(buf) = bytes::collect(&elem, items) {
            let text = literal::bytes(&buf);
            if ty.kind() == Kind::Array {
                let name = self.byte_array_name(ty);
                let elem = self.byte_elem_name(ty);
                return write!(self.out, "{}([]{}({}))", name, elem, text);
            }
            let name = self.byte_slice_name(ty);
            return write!(self.out, "{}({})", name, text);
        }

        if !slot.skip_type {
            let name = self.type_name(ty);
            self.out.write_str(&name)?;
        }
        // Slice elements are always addressable; array elements only when
        // the array is.
        let addressable = ty.kind() == Kind::Slice || slot.addressable;
        self.block(items.is_empty(), |d| {
            for item in items {
                d.dump(
                    item,
                    Slot {
                        addressable,
                        ..Slot::default()
                    },
                )?;
                d.out.write_str(",\n")?;
            }
            Ok(())
        })
    }

    fn dump_map(&mut self, ty: &Type, entries: &[(Value, Value)], slot: Slot) -> fmt::Result {
        if !slot.skip_type {
            let name = self.type_name(ty);
            self.out.write_str(&name)?;
        }
        let mut entries: Vec<&(Value, Value)> = entries.iter().collect();
        if self.config.sort_keys {
            let config = self.config;
            sort_entries(&mut entries, |key| render_detached(config, key));
        }
        self.block(entries.is_empty(), |d| {
            for (key, value) in entries {
                d.dump(key, Slot::default())?;
                d.out.write_str(": ")?;
                d.dump(value, Slot::default().inline())?;
                d.out.write_str(",\n")?;
            }
            Ok(())
        })
    }

    fn dump_struct(&mut self, ty: &Type, fields: &[Field], slot: Slot) -> fmt::Result {
        if !slot.skip_type {
            let name = self.type_name(ty);
            self.out.write_str(&name)?;
        }
        let fields: Vec<&Field> = fields.iter().filter(|f| !is_zero(&f.value)).collect();
        let field_slot = Slot {
            addressable: slot.addressable,
            ..Slot::default()
        }
        .inline();
        self.block(fields.is_empty(), |d| {
            for field in fields {
                d.indent(Slot::default())?;
                write!(d.out, "{}: ", field.name)?;
                d.dump(&field.value, field_slot)?;
                d.out.write_str(",\n")?;
            }
            Ok(())
        })
    }

    /// Write a braced block one level deeper, or a truncation marker once
    /// the configured maximum depth is exceeded.
    fn block(&mut self, empty: bool, body: impl FnOnce(&mut Self) -> fmt::Result) -> fmt::Result {
        if empty {
            return self.out.write_str("{}");
        }
        self.out.write_str("{\n")?;
        self.depth += 1;
        let result = if self.config.max_depth != 0 && self.depth > self.config.max_depth {
            tracing::trace!(depth = self.depth, "max depth reached");
            self.indent(Slot::default())
                .and_then(|()| self.out.write_str(MAX_DEPTH))
                .and_then(|()| self.out.write_char('\n'))
        } else {
            body(self)
        };
        self.depth -= 1;
        result?;
        self.indent(Slot::default())?;
        self.out.write_char('}')
    }

    fn dump_ptr(&mut self, value: &Value, slot: Slot) -> fmt::Result {
        self.pointers.purge(self.depth);

        let mut added = Vec::new();
        let end = self.follow(value, &mut added);
        let result = self.write_chain_end(value, end, slot);
        self.pointers.leave(&added);
        result
    }

    fn write_chain_end(&mut self, value: &Value, end: ChainEnd, slot: Slot) -> fmt::Result {
        match end {
            ChainEnd::Nil => {
                if slot.boxed && value.is_nil() {
                    let name = self.type_name(value.ty());
                    return write!(self.out, "({})(nil)", name);
                }
                self.out.write_str("nil")
            }
            ChainEnd::Cycle { indirects, pointer } => {
                let cell = pointer.get();
                if !renders_composite(cell.unpack()) {
                    return write!(self.out, "nil {}", CIRCULAR);
                }
                let name = self.type_name(cell.unpack().ty());
                write!(self.out, "{}{}{{}} {}", "&".repeat(indirects), name, CIRCULAR)
            }
            ChainEnd::Pointee { indirects, pointer } => {
                let cell = pointer.get();
                let pointee = cell.unpack();
                let name = self.type_name(pointee.ty());
                let inner = Slot {
                    skip_indent: true,
                    addressable: true,
                    ..Slot::default()
                };

                let text = self.override_text(pointee, true);
                if text.is_none() && renders_composite(pointee) {
                    write!(self.out, "{}{}", "&".repeat(indirects), name)?;
                    return self.dump(
                        pointee,
                        Slot {
                            skip_type: true,
                            ..inner
                        },
                    );
                }

                write!(
                    self.out,
                    "{}func(x {}) *{} {{ return &x }}(",
                    "&".repeat(indirects - 1),
                    name,
                    name
                )?;
                match text {
                    Some(text) => self.out.write_str(&text)?,
                    None => self.dump(pointee, inner)?,
                }
                self.out.write_char(')')
            }
        }
    }

    /// Dereference a pointer chain, looking through interfaces, until a
    /// non-pointer value, a nil or an ancestor pointer is reached.
    ///
    /// Addresses newly entered into the chain are pushed onto `added`.
    fn follow(&mut self, value: &Value, added: &mut Vec<usize>) -> ChainEnd {
        let Data::Ptr(Some(first)) = value.data() else {
            return ChainEnd::Nil;
        };
        let mut pointer = first.clone();
        let mut indirects = 0;
        let mut seen = Vec::new();
        loop {
            indirects += 1;
            let addr = pointer.addr();
            // A chain revisiting itself at the same depth is a cycle too.
            if seen.contains(&addr) {
                return ChainEnd::Cycle { indirects, pointer };
            }
            match self.pointers.enter(addr, self.depth) {
                Entry::Ancestor => return ChainEnd::Cycle { indirects, pointer },
                Entry::Added => added.push(addr),
                Entry::Known => {}
            }
            seen.push(addr);

            let next = match pointer.get().unpack().data() {
                Data::Ptr(Some(next)) => next.clone(),
                Data::Ptr(None) | Data::Interface(None) => return ChainEnd::Nil,
                _ => break,
            };
            pointer = next;
        }
        ChainEnd::Pointee { indirects, pointer }
    }

    /// Text replacing the whole literal: a literal rule's rendering, or the
    /// quoted output of the value's `Error()`/`String()` method.
    fn override_text(&mut self, value: &Value, addressable: bool) -> Option<String> {
        let config = self.config;
        if let Some(text) = config
            .literal_rules
            .iter()
            .find_map(|rule| rule.render(value, &mut self.deps))
        {
            return Some(text);
        }
        if !config.invoke_stringers || value.kind() == Kind::Interface {
            return None;
        }
        let methods = value.ty().methods();
        for method in [methods.error, methods.string].into_iter().flatten() {
            if method.receiver == Receiver::Pointer && !addressable {
                continue;
            }
            match method.invoke(value, addressable) {
                Some(text) => return Some(kew_core::quote(&text)),
                None => tracing::warn!(ty = %value.ty(), "stringer failed, rendering structure"),
            }
        }
        None
    }

    fn type_name(&mut self, ty: &Type) -> String {
        TypeNamer::new(&self.config.naming_rules).name(ty, &mut self.deps)
    }

    /// `byte`, or the declared name of a named `uint8` element type.
    ///
    /// cgo chars always convert through `[]byte`.
    fn byte_elem_name(&mut self, ty: &Type) -> String {
        match ty.elem() {
            Some(elem)
                if elem.kind() == Kind::Uint8 && elem.is_named() && !bytes::is_cgo_char(elem) =>
            {
                self.type_name(elem)
            }
            _ => "byte".to_string(),
        }
    }

    fn byte_slice_name(&mut self, ty: &Type) -> String {
        if ty.is_named() {
            return self.type_name(ty);
        }
        format!("[]{}", self.byte_elem_name(ty))
    }

    fn byte_array_name(&mut self, ty: &Type) -> String {
        if ty.is_named() {
            return self.type_name(ty);
        }
        format!("[{}]{}", ty.array_len(), self.byte_elem_name(ty))
    }

    fn indent(&mut self, slot: Slot) -> fmt::Result {
        if slot.skip_indent {
            return Ok(());
        }
        let config = self.config;
        let unit = config.indent.as_str();
        for _ in 0..self.depth {
            self.out.write_str(unit)?;
        }
        Ok(())
    }
}

/// Returns true if `value` is written as a composite literal, whose address
/// can be taken directly with `&`.
fn renders_composite(value: &Value) -> bool {
    match value.data() {
        Data::Struct(_) | Data::Map(Some(_)) => true,
        Data::Slice(Some(items)) | Data::Array(items) => match value.ty().elem() {
            Some(elem) => !bytes::is_byte_like(elem) || bytes::collect(elem, items).is_none(),
            None => true,
        },
        _ => false,
    }
}

/// Render a value on its own, for ordering map keys by their text.
fn render_detached(config: &Config, value: &Value) -> String {
    let mut text = String::new();
    let mut dumper = Dumper::new(config, &mut text);
    // Writing to a String cannot fail.
    let _ = dumper.dump(value, Slot::default());
    text
}
