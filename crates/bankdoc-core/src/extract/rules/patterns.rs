//! Common regex patterns for Malaysian loan document extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Build a labelled amount pattern: `<label> [of] [currency]? <digits>[.<frac>]`.
fn labelled_amount(label: &str) -> Regex {
    Regex::new(&format!(
        r"{label}\s+(?:(?i:of)\s+)?(?:RM|MYR|Ringgit Malaysia)?\s*([\d,]+\.?\d{{0,2}})"
    ))
    .unwrap()
}

lazy_static! {
    // Known banks, most specific first. Matched case-insensitively, the
    // matched text is returned as written in the document.
    pub static ref BANK_NAMES: Vec<Regex> = [
        r"United Overseas Bank \(Malaysia\) Bhd",
        r"United Overseas Bank",
        r"UOB Bank",
        r"UOB",
        r"Maybank",
        r"CIMB Bank",
        r"HSBC Bank",
        r"RHB Bank",
        r"Public Bank Berhad",
        r"Public Bank",
        r"AmBank",
    ]
    .iter()
    .map(|name| Regex::new(&format!("(?i){name}")).unwrap())
    .collect();

    // Labelled amounts
    pub static ref EARNEST_DEPOSIT: Regex = labelled_amount(r"(?i:earnest\s+deposit)");
    pub static ref DEPOSIT: Regex = labelled_amount(r"(?i:deposit)");
    pub static ref AMOUNT: Regex = labelled_amount(r"(?i:amount)");
    pub static ref MRTA_AMOUNT: Regex = labelled_amount(r"MRTA\s+(?i:amount)");
    pub static ref BALANCE: Regex = labelled_amount(r"(?i:balance)");

    // Facility table between "Approved Limit" and the TOTAL row
    pub static ref FACILITY_SECTION: Regex = Regex::new(
        r"(?s)Approved\s+Limit\s+(?:Banking\s+Facilities)?.*?TOTAL\s*[\d,.]*"
    ).unwrap();

    pub static ref SECTION_TERM_LOAN: Regex = Regex::new(
        r"(?i)([\d,.]+)\s*(?:Term\s+Loan|TL)"
    ).unwrap();

    pub static ref SECTION_TOTAL: Regex = Regex::new(
        r"(?i)TOTAL\s+([\d,.]+)"
    ).unwrap();

    pub static ref TERM_LOAN_ANYWHERE: Regex = Regex::new(
        r"(?i)(?:RM)?\s*([\d,]+(?:\.?\d{0,2}))\s*(?:Term\s+Loan|TL)"
    ).unwrap();

    // Digit groups wrapped in stray quotes, e.g. `"7000006".00"`
    pub static ref QUOTED_DIGIT_GROUPS: Regex = Regex::new(
        r#"["']*(?:RM)?\s*([\d,]+)["']*[.:]["']*(\d{2})["']*\s*(?:Term\s+Loan|TL)"#
    ).unwrap();

    // Address shapes, tried in order
    pub static ref ADDRESS_PATTERNS: Vec<Regex> = [
        r"(?i)(?:\blocated\s+at|\bsituated?\s+at|\baddress\b\s*[:-]?)\s*([^\n]+)",
        r"(?i)No\.\s*\d+[^,\n]+,[^,\n]+,[^,\n]+\d{5}",
        r"(?i)(?:property\s+at|situate\s+at|located\s+at)[^\n]*?([^\n]+(?:Road|Street|Avenue|Lane|Drive|Boulevard|Heights|Jalan)[^\n]*)",
        r"(?i)Level\s+\d+,\s+[^,\n]+,\s+[^,\n]+,\s+[^,\n]+\d{5}",
        r"(?i)Level\s+\d+,\s+UOB\s+Plaza\s+\d\s+(?:Kuala\s+Lumpur)?\s*No\.\s*\d+[^,\n]+,[^,\n]*\d{5}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    pub static ref OFFICE_MARKER: Regex = Regex::new(r"Level\s+\d+.*UOB\s+Plaza").unwrap();
    pub static ref POSTCODE: Regex = Regex::new(r"\b\d{5}\b").unwrap();

    // Property identifiers
    pub static ref HSD_NO: Regex = Regex::new(r"(?i)\bHSD\s*No\.?\s*[:-]?\s*(\w+)").unwrap();
    pub static ref PTD_NO: Regex = Regex::new(r"(?i)\bPTD\s*No\.?\s*[:-]?\s*(\w+)").unwrap();
    pub static ref PARCEL_NO: Regex = Regex::new(r"(?i)\bParcel\s*No\.?\s*[:-]?\s*(\w+)").unwrap();
    pub static ref UNIT_NO: Regex = Regex::new(r"(?i)\bUnit\s*No\.?\s*[:-]?\s*(\w+)").unwrap();
    pub static ref STOREY_NO: Regex = Regex::new(r"(?i)\bStorey\s*No\.?\s*[:-]?\s*(\w+)").unwrap();
    pub static ref CAR_PARK_NO: Regex = Regex::new(r"(?i)\bCar\s*Park\s*No\.?\s*[:-]?\s*(\w+)").unwrap();
    pub static ref RESIDENTIAL_AREA: Regex = Regex::new(
        r"(?i)\bResidential\s+Area\s*[:-]?\s*([^,.\n]+)"
    ).unwrap();

    // Location
    // Group 1 is set for the "Sub District of" spelling, which callers skip
    pub static ref DISTRICT: Regex = Regex::new(
        r"(?im)(?:^|[^\w-])(Sub\s+)?District\s*of\s*([^,.\n]+)"
    ).unwrap();
    pub static ref STATE: Regex = Regex::new(r"(?i)\bState\s*of\s*([^,.\n]+)").unwrap();
    pub static ref SUB_DISTRICT: Regex = Regex::new(r"(?i)\bSub[-\s]District\s*of\s*([^,.\n]+)").unwrap();
    pub static ref LAND_OFFICE: Regex = Regex::new(r"(?i)\bLand\s*Office\s*of\s*([^,.\n]+)").unwrap();
    pub static ref TENURE: Regex = Regex::new(r"(?i)\bTenure\s*[:-]?\s*([^,.\n]+)").unwrap();
    pub static ref POSTCODE_PLACE: Regex = Regex::new(r"(\d{5})\s+([^,.\n]+),\s+Malaysia").unwrap();

    // Title
    pub static ref TITLE: Regex = Regex::new(r"(?i)\bTitle\b\s*[:-]?\s*([^,.\n]+)").unwrap();
    pub static ref DESCRIPTION: Regex = Regex::new(r"(?i)\bDescription\b\s*[:-]?\s*([^,.\n]+)").unwrap();
    pub static ref PROPERTY_TYPE: Regex = Regex::new(r"(?i)\bProperty\s+Type\s*[:-]?\s*([^,.\n]+)").unwrap();
    pub static ref CATEGORY: Regex = Regex::new(r"(?i)\bCategory\b\s*[:-]?\s*([^,.\n]+)").unwrap();
    pub static ref TITLE_DESCRIPTION: Regex = Regex::new(
        r"(?i)\bTitle\s+Description\s*[:-]?\s*([^,.\n]+)"
    ).unwrap();
    pub static ref SUBJECT: Regex = Regex::new(r"Subject\s*:\s*([^.]+)").unwrap();

    // Company
    pub static ref COMPANY_REG_NO: Regex = Regex::new(
        r"(?:Company|Registration|Co|Reg)\.?\s*No\.?[:\s]*(\d+[-\s]*\d+(?:[-\s]*[A-Z])?)"
    ).unwrap();
    pub static ref COMPANY_NAME: Regex = Regex::new(
        r"([A-Za-z][A-Za-z ]*)\s+(?:Sdn\.?\s*Bhd|Berhad)\.?\s*\((\d+(?:-[A-Z])?)\)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labelled_amount_label_is_case_insensitive() {
        let caps = DEPOSIT.captures("DEPOSIT OF RM 50,000").unwrap();
        assert_eq!(&caps[1], "50,000");
        let caps = EARNEST_DEPOSIT.captures("Earnest Deposit of RM1,000.00").unwrap();
        assert_eq!(&caps[1], "1,000.00");
    }

    #[test]
    fn mrta_label_requires_uppercase_acronym() {
        assert!(MRTA_AMOUNT.is_match("MRTA Amount of RM 12,000"));
        assert!(!MRTA_AMOUNT.is_match("mrta amount of RM 12,000"));
    }

    #[test]
    fn facility_section_includes_total_figure() {
        let text = "Approved Limit Banking Facilities\n1,000.00 Term Loan\nTOTAL 1,000.00\nOther";
        let section = FACILITY_SECTION.find(text).unwrap().as_str();
        assert!(section.ends_with("TOTAL 1,000.00"));
    }

    #[test]
    fn district_does_not_match_inside_sub_district() {
        let text = "Sub-District of Damansara, District of Petaling";
        assert_eq!(&DISTRICT.captures(text).unwrap()[2], "Petaling");
        assert_eq!(&SUB_DISTRICT.captures(text).unwrap()[1], "Damansara");
    }

    #[test]
    fn district_flags_spaced_sub_district() {
        let caps = DISTRICT.captures("Sub District of Damansara").unwrap();
        assert!(caps.get(1).is_some());
        assert_eq!(&caps[2], "Damansara");
    }

    #[test]
    fn title_label_needs_word_boundary() {
        assert!(!TITLE.is_match("Subtitle text"));
        assert!(TITLE.is_match("Title: Geran 1234"));
    }
}
