use scraper::Html;
use solve_webclient::{BojClient, Client, SampleTestcase, Source};

const PROBLEM_PAGE: &str = r#"
<html><body>
<div id="problem-body">
  <section id="description"><p>Print A+B.</p></section>
  <div class="col-md-6">
    <h2>예제 입력 1</h2>
    <pre class="sampledata" id="sample-input-1">1 2
</pre>
  </div>
  <div class="col-md-6">
    <h2>예제 출력 1</h2>
    <pre class="sampledata" id="sample-output-1">3
</pre>
  </div>
  <div class="col-md-6">
    <h2>예제 입력 2</h2>
    <pre class="sampledata" id="sample-input-2">
10 20
</pre>
  </div>
  <div class="col-md-6">
    <h2>예제 출력 2</h2>
    <pre class="sampledata" id="sample-output-2">30</pre>
  </div>
</div>
</body></html>
"#;

#[test]
fn parse_sample_testcases_in_order() {
    let html = Html::parse_document(PROBLEM_PAGE);
    let got = BojClient::parse_sample_testcases(&html);
    assert_eq!(
        got,
        vec![
            SampleTestcase::new(1, "1 2", "3"),
            SampleTestcase::new(2, "10 20", "30"),
        ]
    );
}

#[test]
fn page_without_samples_yields_nothing() {
    let html = Html::parse_document("<html><body><pre>1 2</pre></body></html>");
    assert!(BojClient::parse_sample_testcases(&html).is_empty());
}

#[test]
fn unpaired_input_is_dropped() {
    let html = Html::parse_document(
        r#"<pre id="sample-input-1">1</pre><pre id="sample-output-1">2</pre><pre id="sample-input-2">3</pre>"#,
    );
    assert_eq!(
        BojClient::parse_sample_testcases(&html),
        vec![SampleTestcase::new(1, "1", "2")]
    );
}

#[test]
fn problem_url() {
    let cli = BojClient::new();
    assert_eq!(cli.source(), Source::Boj);
    assert_eq!(
        cli.problem_url("1000").unwrap().as_str(),
        "https://acmicpc.net/problem/1000"
    );
}
