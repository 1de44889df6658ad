//! Landing page: where each section lives and the current local time.

use chrono::{DateTime, Local, TimeZone};
use url::Url;

const SECTIONS: [(&str, &str, &str); 3] = [
    ("Customers", "ventas clientes", "list, add, edit and delete customers"),
    ("Products", "ventas productos", "manage the catalog and its costs"),
    ("Sales", "ventas ventas", "compose sales from customers and products"),
];

pub fn run(gateway: &Url) -> bool {
    print!("{}", render(gateway, &Local::now()));
    true
}

fn render<Tz>(gateway: &Url, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::from("Ventas\n\n");
    for (title, command, summary) in SECTIONS {
        out.push_str(&format!("  {:<10} {:<17} {}\n", title, command, summary));
    }
    out.push_str(&format!("\nGateway: {}\n", gateway));
    out.push_str(&format!("{}\n", now.format("%A %d %B %Y, %H:%M:%S")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_render_lists_sections_and_clock() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let gateway = Url::parse("http://localhost:8080").unwrap();

        let text = render(&gateway, &now);
        assert!(text.contains("  Customers  ventas clientes   list, add, edit and delete customers\n"));
        assert!(text.contains("ventas productos"));
        assert!(text.contains("ventas ventas"));
        assert!(text.contains("Gateway: http://localhost:8080/\n"));
        assert!(text.ends_with("Tuesday 05 March 2024, 14:07:09\n"));
    }
}
