use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use libc::pid_t;
use crate::data::Connection;
use super::exec;

const TITLE:  &str    = "Active Internet connections (w/o servers)";
const HEADER: &[&str] = &[
    "Proto", "Recv-Q", "Send-Q", "Local", "Address", "Foreign",
    "Address", "State", "PID/Program", "name",
];

/// TCP connections visible in the network namespace of `pid`.
pub async fn connections(pid: pid_t, limit: Duration) -> Result<Vec<Connection>> {
    let pid    = pid.to_string();
    let args   = ["-t", pid.as_str(), "-n", "netstat", "--tcp", "--program"];
    let output = exec::run("nsenter", &args, limit).await?;
    let output = String::from_utf8_lossy(&output);
    parse(&output).with_context(|| format!("invalid netstat output for pid {}", pid))
}

/// Parse the output of `netstat --tcp --program`.
pub fn parse(output: &str) -> Result<Vec<Connection>> {
    let mut lines = output.lines();

    match lines.next() {
        Some(TITLE) => (),
        line        => return Err(anyhow!("unexpected title: {:?}", line)),
    }

    let header = lines.next().unwrap_or("");
    if !header.split_whitespace().eq(HEADER.iter().copied()) {
        return Err(anyhow!("unexpected header: {:?}", header));
    }

    lines.filter(|line| !line.trim().is_empty()).map(connection).collect()
}

fn connection(line: &str) -> Result<Connection> {
    let fields = line.split_whitespace().collect::<Vec<_>>();

    // trailing columns (program arguments) are ignored
    let (proto, local, remote, state, program) = match fields[..] {
        [proto, _, _, local, remote, state, program, ..] => (proto, local, remote, state, program),
        _ => return Err(anyhow!("short line: {:?}", line)),
    };

    let (local_host, local_port)   = split_address(local)?;
    let (remote_host, remote_port) = split_address(remote)?;

    let pid = match program.split('/').next() {
        Some("-") | None => 0,
        Some(pid)        => pid.parse::<pid_t>().with_context(|| format!("invalid pid: {:?}", line))?,
    };

    Ok(Connection {
        protocol:    proto.parse()?,
        local_host:  local_host.to_owned(),
        local_port:  local_port.to_owned(),
        remote_host: remote_host.to_owned(),
        remote_port: remote_port.to_owned(),
        state:       state.to_owned(),
        pid:         pid,
    })
}

/// Split `host:port`, `a.b.c.d:port` or `[v6]:port` at the last colon.
pub fn split_address(address: &str) -> Result<(&str, &str)> {
    address.rsplit_once(':').ok_or_else(|| anyhow!("no port in address {:?}", address))
}

#[cfg(test)]
mod tests {
    use crate::data::Protocol;
    use super::*;

    const OUTPUT: &str = "\
Active Internet connections (w/o servers)
Proto Recv-Q Send-Q Local Address           Foreign Address         State       PID/Program name
tcp        0      0 kube-node-1:2960        10.0.1.2:https          TIME_WAIT   -
tcp        0      0 kube-node-1:9502        10.0.3.4:https          ESTABLISHED 36/abcd
tcp        0      0 kube-node-1:ssh         10.0.9.10:3920          ESTABLISHED 9486/sshd: user
tcp6       0      0 kube-node-1:9168        [::16:5:3]:298          TIME_WAIT   -
";

    fn conn(proto: Protocol, local: (&str, &str), remote: (&str, &str), state: &str, pid: pid_t) -> Connection {
        Connection {
            protocol:    proto,
            local_host:  local.0.into(),
            local_port:  local.1.into(),
            remote_host: remote.0.into(),
            remote_port: remote.1.into(),
            state:       state.into(),
            pid:         pid,
        }
    }

    #[test]
    fn split() {
        assert_eq!(split_address("127.0.0.1:234").unwrap(), ("127.0.0.1", "234"));
        assert_eq!(split_address("foo.com:https").unwrap(), ("foo.com", "https"));
        assert_eq!(split_address("[::16:5]:578").unwrap(), ("[::16:5]", "578"));
        assert!(split_address("localhost").is_err());
    }

    #[test]
    fn parse_output() {
        assert_eq!(parse(OUTPUT).unwrap(), vec![
            conn(Protocol::Tcp,  ("kube-node-1", "2960"), ("10.0.1.2", "https"),  "TIME_WAIT",   0),
            conn(Protocol::Tcp,  ("kube-node-1", "9502"), ("10.0.3.4", "https"),  "ESTABLISHED", 36),
            conn(Protocol::Tcp,  ("kube-node-1", "ssh"),  ("10.0.9.10", "3920"),  "ESTABLISHED", 9486),
            conn(Protocol::Tcp6, ("kube-node-1", "9168"), ("[::16:5:3]", "298"),  "TIME_WAIT",   0),
        ]);
    }

    #[test]
    fn parse_empty_table() {
        let output = OUTPUT.lines().take(2).collect::<Vec<_>>().join("\n");
        assert!(parse(&output).unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_bad_title() {
        let output = OUTPUT.replacen("(w/o servers)", "(servers and established)", 1);
        assert!(parse(&output).is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn parse_rejects_bad_header() {
        let output = OUTPUT.replacen("PID/Program name", "Program", 1);
        assert!(parse(&output).is_err());
    }

    #[test]
    fn parse_rejects_bad_lines() {
        let short = format!("{}udp 0 0 a:1 b:2\n", OUTPUT);
        assert!(parse(&short).is_err());

        let proto = format!("{}udp 0 0 a:1 b:2 - -\n", OUTPUT);
        assert!(parse(&proto).is_err());

        let pid = format!("{}tcp 0 0 a:1 b:2 ESTABLISHED x/y\n", OUTPUT);
        assert!(parse(&pid).is_err());
    }
}
