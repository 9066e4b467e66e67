use std::borrow::Cow;
use std::io::{self, BufWriter, Write};
use crate::data::{Count, Record, PLACEHOLDER};

/// Something printable as one line of a table.
pub trait Row {
    const HEADERS: &'static [&'static str];

    fn fields(&self) -> Vec<Cow<'_, str>>;
}

impl Row for Record {
    const HEADERS: &'static [&'static str] = &[
        "Namespace", "Pod", "Container", "Protocol",
        "Local Host", "Local Port", "Remote Host", "Remote Port",
        "Connection State",
    ];

    fn fields(&self) -> Vec<Cow<'_, str>> {
        let c = &self.connection;
        vec![
            self.container.namespace.as_str().into(),
            self.container.pod.as_str().into(),
            self.container.container.as_str().into(),
            c.protocol.as_str().into(),
            c.local_host.as_str().into(),
            c.local_port.as_str().into(),
            c.remote_host.as_str().into(),
            c.remote_port.as_str().into(),
            c.state.as_str().into(),
        ]
    }
}

impl Row for Count {
    const HEADERS: &'static [&'static str] = &[
        "Namespace", "Pod", "Container", "Remote Host", "Remote Port", "Count",
    ];

    fn fields(&self) -> Vec<Cow<'_, str>> {
        let k = &self.key;
        vec![
            k.container.namespace.as_str().into(),
            k.container.pod.as_str().into(),
            k.container.container.as_str().into(),
            k.remote_host.as_str().into(),
            k.remote_port.as_str().into(),
            self.count.to_string().into(),
        ]
    }
}

/// Write `rows` under a header line, every column left aligned and padded
/// to its widest cell plus two spaces of separation. Empty cells print as
/// a placeholder.
pub fn write<T: Row, W: Write>(rows: &[T], w: W) -> io::Result<()> {
    let mut w = BufWriter::new(w);

    let rows = rows.iter().map(|row| {
        row.fields().into_iter().map(|field| match field.is_empty() {
            true  => Cow::Borrowed(PLACEHOLDER),
            false => field,
        }).collect::<Vec<_>>()
    }).collect::<Vec<_>>();

    let mut widths = T::HEADERS.iter().map(|h| width(h)).collect::<Vec<_>>();
    for row in &rows {
        for (max, field) in widths.iter_mut().zip(row) {
            *max = (*max).max(width(field));
        }
    }

    let last = widths.len().saturating_sub(1);
    for pad in &mut widths[..last] {
        *pad += 2;
    }

    line(&mut w, T::HEADERS.iter().copied(), &widths)?;
    for row in &rows {
        line(&mut w, row.iter().map(|f| &**f), &widths)?;
    }

    w.flush()
}

fn line<'a, W: Write>(w: &mut W, fields: impl Iterator<Item = &'a str>, widths: &[usize]) -> io::Result<()> {
    for (field, pad) in fields.zip(widths) {
        write!(w, "{:<1$}", field, *pad)?;
    }
    writeln!(w)
}

fn width(s: &str) -> usize {
    s.chars().count()
}
