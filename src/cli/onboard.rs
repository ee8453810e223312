//! Onboarding walkthrough for cwfilter CLI

/// Get the onboarding walkthrough content
pub fn get_onboarding_content() -> &'static str {
    r#"WELCOME TO CWFILTER

Audience groups are described by filters over the socio-demographic
catalog. This walkthrough builds five of them for one resource (Ivi,
crossMediaResourceId = 1067) over September 2021.

STEP 1: MEN 35-44
-----------------
Men are sex = 1; the 35-44 age group is ageGroup = 4.

  cwfilter check 'sex = 1 AND ageGroup = 4'
  => sex = 1 AND ageGroup = 4

STEP 2: MEN 18-24 OR WOMEN 25-34
--------------------------------
Two segments joined with OR. Each segment is an AND, so parentheses are
required.

  cwfilter check '(sex = 1 AND ageGroup = 2) OR (sex = 2 AND ageGroup = 3)'
  => (sex = 1 AND ageGroup = 2) OR (sex = 2 AND ageGroup = 3)

STEP 3: EVERYONE 20-56
----------------------
Age groups cannot express 20-56, so use the age variable with >= and <=.

  cwfilter check 'age >= 20 AND age <= 56'
  => age >= 20 AND age <= 56

STEP 4: NON-MANAGERS 25-54
--------------------------
Age groups 3, 4 and 5 via IN instead of three ORs; "not managers" via !=.

  cwfilter check 'ageGroup IN (3, 4, 5) AND occupation != 1'
  => ageGroup IN (3, 4, 5) AND occupation != 1

STEP 5: WORKING RESIDENTS OF GREATER MOSCOW
-------------------------------------------
Geography and demography are separate filters of the same task.

  cwfilter task --kind media --name "Ivi BM work" \
    --date 2021-09-01:2021-09-30 --usetype 1,2,3 \
    --geo 'cityPop = 1' --demo 'work = 1' \
    --media 'crossMediaResourceId = 1067' \
    --slice researchMonth --slice crossMediaResourceId --stat reach

NEXT STEPS
----------
  cwfilter check FILTER --schema catalog.json    Validate against a catalog
  cwfilter eval FILTER --input '{"sex": 1}'      Try a filter on one record
  cwfilter docs                                  Full documentation
"#
}
