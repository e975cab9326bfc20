//! The embedded table-definition resources, one per header table.
//!
//! Each resource is the versioned `KEYWORD, Type` text file for one
//! (detector, filetype, extension) table. Regenerate the list when a
//! definition file is added or removed.

macro_rules! tabledef {
  ($name:literal) => {
    ($name, include_str!(concat!("../../tabledefs/", $name, ".txt")))
  };
}

pub(crate) const TABLE_DEFS: &[(&str, &str)] = &[
  tabledef!("hrc_asn_0"),
  tabledef!("hrc_asn_1"),
  tabledef!("hrc_crj_0"),
  tabledef!("hrc_crj_1"),
  tabledef!("hrc_crj_2"),
  tabledef!("hrc_crj_3"),
  tabledef!("hrc_drz_0"),
  tabledef!("hrc_drz_1"),
  tabledef!("hrc_drz_2"),
  tabledef!("hrc_drz_3"),
  tabledef!("hrc_flt_0"),
  tabledef!("hrc_flt_1"),
  tabledef!("hrc_flt_2"),
  tabledef!("hrc_flt_3"),
  tabledef!("hrc_jif_0"),
  tabledef!("hrc_jif_1"),
  tabledef!("hrc_jif_2"),
  tabledef!("hrc_jit_0"),
  tabledef!("hrc_jit_1"),
  tabledef!("hrc_jit_2"),
  tabledef!("hrc_raw_0"),
  tabledef!("hrc_raw_1"),
  tabledef!("hrc_raw_2"),
  tabledef!("hrc_raw_3"),
  tabledef!("hrc_spt_0"),
  tabledef!("hrc_spt_1"),
  tabledef!("sbc_asn_0"),
  tabledef!("sbc_asn_1"),
  tabledef!("sbc_drz_0"),
  tabledef!("sbc_drz_1"),
  tabledef!("sbc_drz_2"),
  tabledef!("sbc_drz_3"),
  tabledef!("sbc_flt_0"),
  tabledef!("sbc_flt_1"),
  tabledef!("sbc_flt_2"),
  tabledef!("sbc_flt_3"),
  tabledef!("sbc_jif_0"),
  tabledef!("sbc_jif_1"),
  tabledef!("sbc_jif_2"),
  tabledef!("sbc_jit_0"),
  tabledef!("sbc_jit_1"),
  tabledef!("sbc_jit_2"),
  tabledef!("sbc_raw_0"),
  tabledef!("sbc_raw_1"),
  tabledef!("sbc_raw_2"),
  tabledef!("sbc_raw_3"),
  tabledef!("sbc_spt_0"),
  tabledef!("sbc_spt_1"),
  tabledef!("wfc_asn_0"),
  tabledef!("wfc_asn_1"),
  tabledef!("wfc_crc_0"),
  tabledef!("wfc_crc_1"),
  tabledef!("wfc_crc_2"),
  tabledef!("wfc_crc_3"),
  tabledef!("wfc_crc_4"),
  tabledef!("wfc_crc_5"),
  tabledef!("wfc_crc_6"),
  tabledef!("wfc_crj_0"),
  tabledef!("wfc_crj_1"),
  tabledef!("wfc_crj_2"),
  tabledef!("wfc_crj_3"),
  tabledef!("wfc_crj_4"),
  tabledef!("wfc_crj_5"),
  tabledef!("wfc_crj_6"),
  tabledef!("wfc_drc_0"),
  tabledef!("wfc_drc_1"),
  tabledef!("wfc_drc_2"),
  tabledef!("wfc_drc_3"),
  tabledef!("wfc_drz_0"),
  tabledef!("wfc_drz_1"),
  tabledef!("wfc_drz_2"),
  tabledef!("wfc_drz_3"),
  tabledef!("wfc_flc_0"),
  tabledef!("wfc_flc_1"),
  tabledef!("wfc_flc_2"),
  tabledef!("wfc_flc_3"),
  tabledef!("wfc_flc_4"),
  tabledef!("wfc_flc_5"),
  tabledef!("wfc_flc_6"),
  tabledef!("wfc_flt_0"),
  tabledef!("wfc_flt_1"),
  tabledef!("wfc_flt_2"),
  tabledef!("wfc_flt_3"),
  tabledef!("wfc_flt_4"),
  tabledef!("wfc_flt_5"),
  tabledef!("wfc_flt_6"),
  tabledef!("wfc_jif_0"),
  tabledef!("wfc_jif_1"),
  tabledef!("wfc_jif_2"),
  tabledef!("wfc_jif_3"),
  tabledef!("wfc_jif_4"),
  tabledef!("wfc_jif_5"),
  tabledef!("wfc_jif_6"),
  tabledef!("wfc_jit_0"),
  tabledef!("wfc_jit_1"),
  tabledef!("wfc_jit_2"),
  tabledef!("wfc_jit_3"),
  tabledef!("wfc_jit_4"),
  tabledef!("wfc_jit_5"),
  tabledef!("wfc_jit_6"),
  tabledef!("wfc_raw_0"),
  tabledef!("wfc_raw_1"),
  tabledef!("wfc_raw_2"),
  tabledef!("wfc_raw_3"),
  tabledef!("wfc_raw_4"),
  tabledef!("wfc_raw_5"),
  tabledef!("wfc_raw_6"),
  tabledef!("wfc_spt_0"),
  tabledef!("wfc_spt_1"),
];
