use crate::generator::{EdgeRow, VertexRow};

/// Header rows the bulk graph loader expects, verbatim.
pub const VERTICES_HEADER: &str = "~label,~id,parent_id,name";
pub const EDGES_HEADER: &str = "~label,~to,~from,~id";

pub fn encode_vertices(rows: &[VertexRow]) -> Vec<u8> {
    let mut out = String::with_capacity(VERTICES_HEADER.len() + 1 + rows.len() * 64);
    out.push_str(VERTICES_HEADER);
    out.push('\n');
    for row in rows {
        push_record(&mut out, &[&row.label, &row.id, &row.parent_id, &row.name]);
    }
    out.into_bytes()
}

pub fn encode_edges(rows: &[EdgeRow]) -> Vec<u8> {
    let mut out = String::with_capacity(EDGES_HEADER.len() + 1 + rows.len() * 96);
    out.push_str(EDGES_HEADER);
    out.push('\n');
    for row in rows {
        push_record(&mut out, &[&row.label, &row.to, &row.from, &row.id]);
    }
    out.into_bytes()
}

fn push_record(out: &mut String, fields: &[&str]) {
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

// RFC 4180: quote only when the field needs it, double embedded quotes.
fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        for ch in field.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}
