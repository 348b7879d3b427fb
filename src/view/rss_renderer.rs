use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::Post;
use crate::text_utils::feed_pub_date;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">

<channel>
  <title>Folio</title>
  <link>https://example.com</link>
  <description>Notes and essays</description>
  <item>
    <title>Making Peace with the Borrow Checker</title>
    <link>https://example.com/post/borrow-checker</link>
    <guid>https://example.com/post/borrow-checker</guid>
    <description>Why the compiler keeps rejecting your references.</description>
    <pubDate>Thu, 1 Feb 2024 00:00:00 +0000</pubDate>
  </item>
</channel>

</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, posts: &[Post]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for post in posts {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", post.title.as_str())?;

            let link = post_link(self.ch_link, post.slug.as_str());
            push_text(&mut writer, "link", link.as_str())?;

            // The guid is the permalink itself
            push_text(&mut writer, "guid", link.as_str())?;

            // An empty explicit description falls back to the full body
            let description = if post.description.is_empty() {
                post.content.as_str()
            } else {
                post.description.as_str()
            };
            push_cdata(&mut writer, "description", description)?;

            // Empty when the raw date does not parse
            push_text(&mut writer, "pubDate", &feed_pub_date(&post.raw_date))?;

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn post_link(base_url: &str, slug: &str) -> String {
    let base_url = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{}/post/{}", base_url, slug)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::content::Post;

    use super::*;

    fn create_post(slug: &str, raw_date: &str, description: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: format!("title-of-{}", slug),
            description: description.to_string(),
            date: String::new(),
            raw_date: raw_date.to_string(),
            collection: String::new(),
            collection_title: String::new(),
            collection_description: String::new(),
            collection_index: 0,
            collection_total: 0,
            content: format!("<p>body-of-{}</p>", slug),
            read_time_minutes: 1,
            toc: vec![],
        }
    }

    #[test]
    fn render_xml() {
        let posts = vec![
            create_post("one", "2024-03-05", "summary-of-one"),
            create_post("two", "unknown", ""),
        ];

        let rss = RssChannel {
            ch_title: "my feed",
            ch_link: "https://example.com/",
            ch_desc: "My blog feed",
        };
        let xml = rss.render(&posts).unwrap();
        println!("XML: {}", str::from_utf8(&xml).unwrap());
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>my feed</title><link>https://example.com/</link><description>My blog feed</description><item><title>title-of-one</title><link>https://example.com/post/one</link><guid>https://example.com/post/one</guid><description><![CDATA[summary-of-one]]></description><pubDate>Tue, 5 Mar 2024 00:00:00 +0000</pubDate></item><item><title>title-of-two</title><link>https://example.com/post/two</link><guid>https://example.com/post/two</guid><description><![CDATA[<p>body-of-two</p>]]></description><pubDate></pubDate></item></channel></rss>"##;

    #[test]
    fn cdata_end_marker_is_split() {
        let mut post = create_post("tricky", "2024-01-01", "contains ]]> marker");
        post.description = "contains ]]> marker".to_string();

        let rss = RssChannel {
            ch_title: "feed",
            ch_link: "https://example.com",
            ch_desc: "desc",
        };
        let xml = rss.render(&[post]).unwrap();
        let rendered = str::from_utf8(&xml).unwrap();
        assert!(rendered.contains("<![CDATA[contains ]] > marker]]>"));
    }
}
