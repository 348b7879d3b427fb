#[cfg(test)]
pub const POST_DATA: &str = "<!-- title: This is a title -->
<!-- date: 2024-02-27 -->
<!-- description: A one-line summary -->
<!-- collection: samples -->
<p>Opening paragraph.</p>
<h2>First Section</h2>
<p>Body text.</p>
<!-- an unrelated comment that stays -->
<h3>Details</h3>
<p>More text.</p>
";

#[cfg(test)]
pub const COLLECTION_DATA: &str = "<!-- title: Sample Series -->
<p>Essays about <em>samples</em>,
written over time.</p>
";
