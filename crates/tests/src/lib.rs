#[cfg(test)]
mod common;

#[cfg(test)]
mod locations_tests;

#[cfg(test)]
mod evidence_upload_tests;

#[cfg(test)]
mod document_upload_tests;

#[cfg(test)]
mod report_generate_tests;

#[cfg(test)]
mod report_list_tests;

#[cfg(test)]
mod report_delete_tests;


#[cfg(test)]
mod wizard_flow_tests;
