use axum::Router;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

/// A listing row in the shape of the Hacker News markup.
pub struct Row {
    id: String,
    title: String,
    href: String,
    score: Option<u32>,
    age: Option<String>,
    age_title: Option<String>,
}

impl Row {
    pub fn new(id: &str, title: &str, href: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            href: href.to_string(),
            score: None,
            age: Some("1 hour ago".to_string()),
            age_title: None,
        }
    }

    pub fn score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn age(mut self, age: &str) -> Self {
        self.age = Some(age.to_string());
        self
    }

    pub fn age_title(mut self, title: &str) -> Self {
        self.age_title = Some(title.to_string());
        self
    }

    pub fn no_age(mut self) -> Self {
        self.age = None;
        self
    }

    fn render(&self) -> String {
        let score = self
            .score
            .map(|s| format!(r#"<span class="score" id="score_{}">{} points</span> by someone "#, self.id, s))
            .unwrap_or_default();
        let age = self
            .age
            .as_ref()
            .map(|age| {
                let title = self
                    .age_title
                    .as_ref()
                    .map(|t| format!(r#" title="{}""#, t))
                    .unwrap_or_default();
                format!(r#"<span class="age"{}><a href="item?id={}">{}</a></span>"#, title, self.id, age)
            })
            .unwrap_or_default();

        format!(
            r#"<tr class="athing submission" id="{id}">
  <td class="title"><span class="rank">1.</span></td>
  <td class="title"><span class="titleline"><a href="{href}">{title}</a><span class="sitebit comhead"> (<a href="from?site=x"><span class="sitestr">x</span></a>)</span></span></td>
</tr>
<tr>
  <td colspan="2"></td>
  <td class="subtext"><span class="subline">{score}{age} | <a href="item?id={id}">comments</a></span></td>
</tr>
<tr class="spacer" style="height:5px"></tr>
"#,
            id = self.id,
            href = self.href,
            title = self.title,
            score = score,
            age = age,
        )
    }
}

pub fn listing_page(rows: &[Row]) -> String {
    let body: String = rows.iter().map(Row::render).collect();
    format!(
        r#"<html><head><title>Hacker News</title></head><body><center><table id="hnmain"><tr><td><table class="itemlist">
{}</table></td></tr></table></center></body></html>"#,
        body
    )
}
