use std::io::{BufWriter, Write};
use anyhow::Result;
use serde::Serialize;

/// One JSON object per line.
pub fn write<T: Serialize, W: Write>(rows: &[T], w: W) -> Result<()> {
    let mut w = BufWriter::new(w);
    for row in rows {
        serde_json::to_writer(&mut w, row)?;
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use serde_json::{json, Value};
    use crate::data::{ContainerIdentity, Count, Key};
    use super::*;

    #[test]
    fn lines() {
        let count = |container: &str, n| Count {
            key: Key {
                container:   Arc::new(ContainerIdentity {
                    namespace: "myapp".into(),
                    pod:       "frontend".into(),
                    container: container.into(),
                }),
                remote_host: "10.0.3.4".into(),
                remote_port: "6230".into(),
            },
            count: n,
        };

        let mut buf = Vec::new();
        write(&[count("fe-server", 1), count("", 3)], &mut buf).unwrap();

        let out   = String::from_utf8(buf).unwrap();
        let lines = out.lines().map(|l| serde_json::from_str(l).unwrap()).collect::<Vec<Value>>();

        assert_eq!(lines, vec![
            json!({
                "pod_namespace":  "myapp",
                "pod_name":       "frontend",
                "container_name": "fe-server",
                "remote_host":    "10.0.3.4",
                "remote_port":    "6230",
                "count":          1,
            }),
            json!({
                "pod_namespace":  "myapp",
                "pod_name":       "frontend",
                "container_name": "-",
                "remote_host":    "10.0.3.4",
                "remote_port":    "6230",
                "count":          3,
            }),
        ]);
    }

    #[test]
    fn empty() {
        let mut buf = Vec::new();
        write::<Count, _>(&[], &mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
