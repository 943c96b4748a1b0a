#![allow(dead_code)]

use chrono::{Duration, Local, NaiveDate};
use flate2::write::GzEncoder;
use flate2::Compression;
use itc_client::{RawResponse, Result, Transport};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::Mutex;

/// One request captured by [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub struct SentRequest {
  pub endpoint: String,
  pub form: Vec<(String, String)>,
}

impl SentRequest {
  pub fn field(&self, name: &str) -> Option<&str> {
    self.form.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
  }

  pub fn envelope(&self) -> serde_json::Value {
    serde_json::from_str(self.field("jsonRequest").expect("jsonRequest field")).unwrap()
  }

  pub fn query_input(&self) -> String {
    self.envelope()["queryInput"].as_str().unwrap().to_string()
  }
}

/// Transport answering from a fixed queue and recording every request
#[derive(Default)]
pub struct ScriptedTransport {
  responses: Mutex<VecDeque<RawResponse>>,
  sent: Mutex<Vec<SentRequest>>,
}

impl ScriptedTransport {
  pub fn new(responses: Vec<RawResponse>) -> Self {
    Self { responses: Mutex::new(responses.into()), sent: Mutex::new(Vec::new()) }
  }

  pub fn push(&self, response: RawResponse) {
    self.responses.lock().unwrap().push_back(response);
  }

  pub fn sent(&self) -> Vec<SentRequest> {
    self.sent.lock().unwrap().clone()
  }

  pub fn call_count(&self) -> usize {
    self.sent.lock().unwrap().len()
  }
}

impl Transport for ScriptedTransport {
  fn send(&self, endpoint: &str, form: &[(String, String)]) -> Result<RawResponse> {
    self.sent.lock().unwrap().push(SentRequest { endpoint: endpoint.to_string(), form: form.to_vec() });
    let response = self.responses.lock().unwrap().pop_front();
    Ok(response.unwrap_or_else(|| panic!("unexpected request to {endpoint}")))
  }
}

pub const SALES_URL: &str = "https://reportingitc-reporter.apple.com/reportservice/sales/v1";
pub const FINANCE_URL: &str = "https://reportingitc-reporter.apple.com/reportservice/finance/v1";

pub fn init_tracing() {
  let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn today() -> NaiveDate {
  Local::now().date_naive()
}

pub fn days_from_today(days: i64) -> String {
  (today() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

pub fn ok(body: impl Into<Vec<u8>>) -> RawResponse {
  RawResponse::new(200, Vec::<(String, String)>::new(), body.into())
}

pub fn status(code: u16, body: &str) -> RawResponse {
  RawResponse::new(code, Vec::<(String, String)>::new(), body.as_bytes().to_vec())
}

pub fn view_token_xml(token: &str, expires: &str) -> String {
  format!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<ViewToken>\n    \
     <AccessToken>{token}</AccessToken>\n    <ExpirationDate>{expires}</ExpirationDate>\n</ViewToken>\n"
  )
}

pub fn no_token_xml() -> String {
  "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<ViewToken><Message>You currently \
   don't have an access token. Type generateToken to generate a new one.</Message>\n</ViewToken>\n"
    .to_string()
}

pub fn generated_token_xml(token: &str) -> String {
  format!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<ViewToken>\n    \
     <AccessToken>{token}</AccessToken>\n    <ExpirationDate>2018-09-24</ExpirationDate>\n    \
     <Message>Your new access token has been generated.</Message>\n</ViewToken>\n"
  )
}

pub const GENERATE_PROMPT: &str = "If you generate a new access token, your existing token will be \
  deleted. You will need to save your new access token within your properties file. Do you still \
  want to continue? (y/n): ";

pub fn challenge(request_id: &str) -> RawResponse {
  RawResponse::new(200, [("SERVICE_REQUEST_ID", request_id)], GENERATE_PROMPT.as_bytes().to_vec())
}

pub fn vendors_xml(vendors: &[&str]) -> String {
  let body: String = vendors.iter().map(|v| format!("<Vendor>{v}</Vendor>")).collect();
  format!(
    "\n<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Vendors>\n{body}\n</Vendors>\n    "
  )
}

pub const VENDORS_AND_REGIONS_XML: &str = r#"
<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<VendorsAndRegions>
    <Vendor>
        <Number>80012345</Number>
        <Region>
            <Code>US</Code>
            <Reports>
                <Report>Financial</Report>
            </Reports>
        </Region>
        <Region>
            <Code>JP</Code>
            <Reports>
                <Report>Financial</Report>
            </Reports>
        </Region>
    </Vendor>
    <Vendor>
        <Number>80067891</Number>
        <Region>
            <Code>US</Code>
            <Reports>
                <Report>Financial</Report>
            </Reports>
        </Region>
    </Vendor>
</VendorsAndRegions>
"#;

pub fn gzip(text: &str) -> Vec<u8> {
  let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(text.as_bytes()).unwrap();
  encoder.finish().unwrap()
}

/// Tab-separated report with a header and `rows` data lines
pub fn report_tsv(rows: usize) -> String {
  let mut text = String::from("Provider\tSKU\tUnits\tTitle\n");
  for i in 0..rows {
    text.push_str(&format!("APPLE\tsku-{i}\t{i}\t\"Title\twith tab {i}\"\n"));
  }
  text
}
