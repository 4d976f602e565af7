use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Cap Rate Portfolio" }
                style { (STYLES) }
            }
            body {
                header class="topbar" {
                    h3 { "Cap Rate Portfolio" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/api/get-portfolios" { "Saved portfolios (JSON)" } }
                        }
                    }
                }
                main class="container" {
                    (content)
                }
            }
        }
    }
}

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
.topbar { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.topbar ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
.container { max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }
.card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.cards { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 0.5rem; border-bottom: 1px solid #eee; }
td.num, th.num { text-align: right; }
.muted { color: #6b7280; }
.warn { color: #b45309; }
"#;
